use presentation_tts::controllers::{BatchController, InputMode, RunOptions};
use presentation_tts::domain::batch::TaskHandler;
use presentation_tts::domain::presentation::PresentationService;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub mod aws_mocks;

use fakes::FakeGateway;
use fixtures::TestFixtures;

pub const GROUP: &str = "rustconf";

pub struct TestContext {
    pub gateway: Arc<FakeGateway>,
    pub fixtures: TestFixtures,
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let fixtures = TestFixtures::new(dir.path());

        Self {
            gateway: Arc::new(FakeGateway::new()),
            fixtures,
            dir,
        }
    }

    /// Presentation pipeline wired to the in-memory gateway
    pub fn service(&self) -> Arc<PresentationService> {
        Arc::new(PresentationService::new(
            self.gateway.clone(),
            self.gateway.clone(),
            self.gateway.clone(),
        ))
    }

    pub fn controller(&self, handler: Arc<dyn TaskHandler>) -> BatchController {
        BatchController::new(handler)
    }

    pub fn batch_options(&self) -> RunOptions {
        RunOptions {
            mode: InputMode::Batch(self.dir.path().to_path_buf()),
            group: GROUP.to_string(),
            max_workers: 4,
            assume_yes: true,
            dry_run: false,
        }
    }

    pub fn single_options(&self, file: PathBuf) -> RunOptions {
        RunOptions {
            mode: InputMode::Single(file),
            ..self.batch_options()
        }
    }
}
