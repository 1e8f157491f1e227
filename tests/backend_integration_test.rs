use mangalens::common::{fetch_variants, ImageTransfer, ImageVariant, TranslationEditSession, UploadFile};
use mangalens::{Config, HttpTransfer};

// 最小の有効なPNG（1x1 白）
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53,
    0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8, 0xFF, 0xFF, 0x3F,
    0x00, 0x05, 0xFE, 0x02, 0xFE, 0xA7, 0x35, 0x81, 0x84, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E,
    0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[tokio::test]
async fn backend_round_trip_integration() {
    let base_url = match std::env::var("MANGALENS_BACKEND_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("MANGALENS_BACKEND_URL not set; skipping integration test");
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter("mangalens=debug,mangalens_common=debug")
        .with_test_writer()
        .try_init();

    let client = HttpTransfer::new(&Config::new(&base_url).expect("invalid backend url"));
    client.health().await.expect("backend is not healthy");

    let file = UploadFile::new("integration-test.png", "image/png", TINY_PNG.to_vec());
    let image_id = client.upload(&file).await.expect("upload failed");
    let result = client.process(&image_id).await.expect("process failed");
    assert_eq!(result.image_id, image_id);

    let images = fetch_variants(&client, &result, &ImageVariant::REVIEW).await;
    assert_eq!(images.len(), 4);

    if result.translations.is_empty() {
        eprintln!("no text detected in the test image; skipping save");
        return;
    }

    let mut session = TranslationEditSession::new(&result);
    let first = session.entries()[0].id;
    session.edit_text(first, "integration").unwrap();
    let handle = session.save(&client).await.expect("save failed");
    assert!(!handle.is_placeholder());
}
