use crate::e2e::helpers;

use helpers::{aws_mocks, TestContext};
use presentation_tts::domain::presentation::{PresentationService, TranscriptEntry};
use presentation_tts::domain::tts::{LanguageCode, VoiceGender};
use presentation_tts::error::AppError;
use presentation_tts::infrastructure::config::TtsEngine;
use presentation_tts::infrastructure::repositories::{
    AudioRepository, DynamoDbPresentationRepository, PollyTtsRepository, PresentationRepository,
    S3AudioRepository, TtsRepository,
};
use std::sync::Arc;

fn aws_backed_service() -> Arc<PresentationService> {
    Arc::new(PresentationService::new(
        Arc::new(PollyTtsRepository::new(
            aws_mocks::create_mock_polly_client(),
            TtsEngine::Neural,
        )),
        Arc::new(S3AudioRepository::new(
            aws_mocks::create_mock_s3_client(),
            "test-bucket",
        )),
        Arc::new(DynamoDbPresentationRepository::new(
            aws_mocks::create_mock_dynamodb_client(),
            "presentations",
        )),
    ))
}

#[tokio::test]
async fn it_should_map_polly_failures_to_synthesis_errors() {
    let repo = PollyTtsRepository::new(aws_mocks::create_mock_polly_client(), TtsEngine::Neural);

    let err = repo
        .synthesize("こんにちは", LanguageCode::Japanese, VoiceGender::Female)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Synthesis(_)), "{:?}", err);
}

#[tokio::test]
async fn it_should_map_s3_failures_to_storage_errors() {
    let repo = S3AudioRepository::new(aws_mocks::create_mock_s3_client(), "test-bucket");

    let err = repo
        .upload("presentation/p0/0.mp3", aws_mocks::mock_audio_bytes())
        .await
        .unwrap_err();

    assert!(
        matches!(&err, AppError::Storage(msg) if msg.contains("s3://test-bucket/presentation/p0/0.mp3")),
        "{:?}",
        err
    );
}

#[tokio::test]
async fn it_should_map_dynamodb_failures_to_persistence_errors() {
    let repo = DynamoDbPresentationRepository::new(
        aws_mocks::create_mock_dynamodb_client(),
        "presentations",
    );

    let err = repo.create_presentation("keynote", "rustconf").await.unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)), "{:?}", err);

    let err = repo.upsert_group_pointer("rustconf", "p0").await.unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)), "{:?}", err);

    let entry = TranscriptEntry {
        order: 0,
        script: "Hello".to_string(),
        transcript: "こんにちは".to_string(),
        voice_path: "presentation/p0/0.mp3".to_string(),
    };
    let err = repo.append_transcript("p0", &entry).await.unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)), "{:?}", err);
}

#[tokio::test]
async fn it_should_report_every_file_when_aws_is_unreachable() {
    let ctx = TestContext::new();
    for name in ["a_EN_M.csv", "b_JA_F.csv", "c_EN_F.csv"] {
        ctx.fixtures.create_script(name, 2);
    }

    let mut input = std::io::Cursor::new(Vec::new());
    let mut output = Vec::new();
    let outcome = ctx
        .controller(aws_backed_service())
        .run(&ctx.batch_options(), &mut input, &mut output)
        .await
        .unwrap();

    assert!(!outcome.is_success());
    match outcome {
        presentation_tts::controllers::RunOutcome::Completed(report) => {
            assert_eq!(report.total(), 3);
            assert_eq!(report.failure_count, 3);
            for result in &report.results {
                assert!(result.message.starts_with("Persistence error"), "{}", result.message);
            }
        }
        other => panic!("expected a completed run, got {:?}", other),
    }
}
