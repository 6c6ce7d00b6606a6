use crate::e2e::helpers;

use helpers::fakes::Call;
use helpers::{TestContext, GROUP};
use pretty_assertions::assert_eq;
use presentation_tts::domain::batch::TaskHandler;
use presentation_tts::domain::presentation::{resolve_task, TranscriptEntry};
use presentation_tts::domain::tts::{LanguageCode, VoiceGender};
use presentation_tts::error::AppError;

#[tokio::test]
async fn it_should_create_presentation_then_voice_each_row_in_order() {
    let ctx = TestContext::new();
    let path = ctx.fixtures.create_script_with_blanks("opening_talk_EN_F.csv");
    let task = resolve_task(&path, GROUP).unwrap();

    let message = ctx.service().handle(&task).await.unwrap();

    assert_eq!(message, "2 rows uploaded to presentation p0");
    assert_eq!(
        ctx.gateway.calls(),
        vec![
            Call::CreatePresentation {
                title: "opening_talk".to_string(),
                group: GROUP.to_string(),
            },
            Call::UpsertGroup {
                group: GROUP.to_string(),
                presentation_id: "p0".to_string(),
            },
            Call::Synthesize {
                text: "ようこそ".to_string(),
                language: LanguageCode::Japanese,
                gender: VoiceGender::Female,
            },
            Call::Upload {
                path: "presentation/p0/0.mp3".to_string(),
                size: 8,
            },
            Call::AppendTranscript {
                presentation_id: "p0".to_string(),
                entry: TranscriptEntry {
                    order: 0,
                    script: "Welcome".to_string(),
                    transcript: "ようこそ".to_string(),
                    voice_path: "presentation/p0/0.mp3".to_string(),
                },
            },
            Call::Synthesize {
                text: "ありがとう".to_string(),
                language: LanguageCode::Japanese,
                gender: VoiceGender::Female,
            },
            Call::Upload {
                path: "presentation/p0/1.mp3".to_string(),
                size: 8,
            },
            Call::AppendTranscript {
                presentation_id: "p0".to_string(),
                entry: TranscriptEntry {
                    order: 1,
                    script: "Thank you".to_string(),
                    transcript: "ありがとう".to_string(),
                    voice_path: "presentation/p0/1.mp3".to_string(),
                },
            },
        ]
    );
    assert!(ctx.gateway.object("presentation/p0/1.mp3").is_some());
    assert_eq!(ctx.gateway.group_pointer(GROUP), Some("p0".to_string()));
}

#[tokio::test]
async fn it_should_assign_unique_orders_and_voice_paths() {
    let ctx = TestContext::new();
    let path = ctx.fixtures.create_script("workshop_JA_M.csv", 12);
    let task = resolve_task(&path, GROUP).unwrap();

    ctx.service().handle(&task).await.unwrap();

    let entries = ctx.gateway.transcripts_for("p0");
    assert_eq!(entries.len(), 12);
    for (index, entry) in entries.iter().enumerate() {
        assert_eq!(entry.order, index);
        assert_eq!(entry.voice_path, format!("presentation/p0/{}.mp3", index));
        assert_eq!(entry.script, format!("Line {}", index));
    }
}

#[tokio::test]
async fn it_should_leave_committed_rows_when_a_later_row_fails() {
    let ctx = TestContext::new();
    ctx.gateway.fail_synthesis_containing("行 2");
    let path = ctx.fixtures.create_script("talk_EN_M.csv", 5);
    let task = resolve_task(&path, GROUP).unwrap();

    let err = ctx.service().handle(&task).await.unwrap_err();

    assert!(matches!(err, AppError::Synthesis(_)));
    // Rows 0 and 1 stay recorded, nothing after the failing row is attempted
    let entries = ctx.gateway.transcripts_for("p0");
    assert_eq!(entries.len(), 2);
    assert_eq!(ctx.gateway.synthesize_count(), 3);
    assert_eq!(ctx.gateway.group_pointer(GROUP), Some("p0".to_string()));
}

#[tokio::test]
async fn it_should_report_storage_failures() {
    let ctx = TestContext::new();
    ctx.gateway.fail_uploads();
    let path = ctx.fixtures.create_script("talk_EN_M.csv", 2);
    let task = resolve_task(&path, GROUP).unwrap();

    let err = ctx.service().handle(&task).await.unwrap_err();

    assert!(matches!(err, AppError::Storage(msg) if msg.contains("presentation/p0/0.mp3")));
    assert!(ctx.gateway.transcripts_for("p0").is_empty());
}

#[tokio::test]
async fn it_should_not_write_anything_for_a_file_missing_columns() {
    let ctx = TestContext::new();
    let path = ctx
        .fixtures
        .write_file("legacy_EN_M.csv", "english,japanese\nHello,こんにちは\n");
    let task = resolve_task(&path, GROUP).unwrap();

    let err = ctx.service().handle(&task).await.unwrap_err();

    assert!(matches!(err, AppError::Format(_)));
    assert_eq!(ctx.gateway.call_count(), 0);
}

#[tokio::test]
async fn it_should_create_an_empty_presentation_for_a_header_only_file() {
    let ctx = TestContext::new();
    let path = ctx.fixtures.create_script("placeholder_EN_M.csv", 0);
    let task = resolve_task(&path, GROUP).unwrap();

    let message = ctx.service().handle(&task).await.unwrap();

    assert_eq!(message, "0 rows uploaded to presentation p0");
    assert_eq!(ctx.gateway.synthesize_count(), 0);
}
