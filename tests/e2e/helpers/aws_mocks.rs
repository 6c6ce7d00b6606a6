use std::sync::Arc;

// Non-existent endpoint: every request fails at the transport layer
const UNREACHABLE_ENDPOINT: &str = "http://localhost:9999";
const REGION: &str = "ap-northeast-1";

pub fn create_mock_polly_client() -> Arc<aws_sdk_polly::Client> {
    let config = aws_sdk_polly::Config::builder()
        .behavior_version(aws_sdk_polly::config::BehaviorVersion::latest())
        .region(aws_sdk_polly::config::Region::new(REGION))
        .endpoint_url(UNREACHABLE_ENDPOINT)
        .build();

    Arc::new(aws_sdk_polly::Client::from_conf(config))
}

pub fn create_mock_s3_client() -> Arc<aws_sdk_s3::Client> {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
        .region(aws_sdk_s3::config::Region::new(REGION))
        .endpoint_url(UNREACHABLE_ENDPOINT)
        .force_path_style(true)
        .build();

    Arc::new(aws_sdk_s3::Client::from_conf(config))
}

pub fn create_mock_dynamodb_client() -> Arc<aws_sdk_dynamodb::Client> {
    let config = aws_sdk_dynamodb::Config::builder()
        .behavior_version(aws_sdk_dynamodb::config::BehaviorVersion::latest())
        .region(aws_sdk_dynamodb::config::Region::new(REGION))
        .endpoint_url(UNREACHABLE_ENDPOINT)
        .build();

    Arc::new(aws_sdk_dynamodb::Client::from_conf(config))
}

pub fn mock_audio_bytes() -> Vec<u8> {
    // Minimal valid MP3 file (silence)
    vec![
        0xFF, 0xFB, 0x90, 0x00, // MP3 frame header
        0x00, 0x00, 0x00, 0x00, // Some padding
    ]
}
