use crate::domain::model::{DbCheckReport, DbStep, TestUser};
use crate::domain::ports::{StoreConnector, UserStore};
use crate::utils::error::DiagError;
use crate::utils::monitor::CheckTimer;

/// 每個步驟結束後的回報
pub trait StepReporter {
    fn step_succeeded(&mut self, step: DbStep, detail: &str);
    fn step_failed(&mut self, step: DbStep, error: &DiagError);
}

/// 直接印到 console
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl StepReporter for ConsoleReporter {
    fn step_succeeded(&mut self, step: DbStep, detail: &str) {
        println!("✅ {}: {}", step, detail);
    }

    fn step_failed(&mut self, step: DbStep, error: &DiagError) {
        println!("❌ {} failed: {}", step, error);
    }
}

/// open → insert → delete → close，任何一步失敗就中止
pub struct DbCheck<C: StoreConnector> {
    connector: C,
    timing: bool,
}

impl<C: StoreConnector> DbCheck<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            timing: false,
        }
    }

    pub fn with_timing(mut self, enabled: bool) -> Self {
        self.timing = enabled;
        self
    }

    pub async fn run(
        &self,
        connection_string: &str,
        user: &TestUser,
        reporter: &mut dyn StepReporter,
    ) -> DbCheckReport {
        let mut report = DbCheckReport::default();
        let mut timer = CheckTimer::new(self.timing);

        let store = match self.connector.connect(connection_string).await {
            Ok(store) => store,
            Err(e) => return fail(report, reporter, DbStep::Open, e),
        };
        timer.mark("open");
        reporter.step_succeeded(DbStep::Open, "connected to database");
        report.completed.push(DbStep::Open);

        let id = match store.insert_user(user).await {
            Ok(id) => id,
            Err(e) => return fail(report, reporter, DbStep::Insert, e),
        };
        timer.mark("insert");
        reporter.step_succeeded(
            DbStep::Insert,
            &format!("inserted test user {} ({})", user.email, id),
        );
        report.completed.push(DbStep::Insert);

        match store.delete_user(&id).await {
            Ok(0) => {
                let e = DiagError::StepError {
                    step: DbStep::Delete.to_string(),
                    message: format!("record {} was not found", id),
                };
                return fail(report, reporter, DbStep::Delete, e);
            }
            Ok(count) => {
                timer.mark("delete");
                reporter.step_succeeded(DbStep::Delete, &format!("removed {} record(s)", count));
                report.completed.push(DbStep::Delete);
            }
            Err(e) => return fail(report, reporter, DbStep::Delete, e),
        }

        if let Err(e) = store.close().await {
            return fail(report, reporter, DbStep::Close, e);
        }
        timer.mark("close");
        reporter.step_succeeded(DbStep::Close, "connection closed");
        report.completed.push(DbStep::Close);

        timer.log_final_stats();
        report
    }
}

fn fail(
    mut report: DbCheckReport,
    reporter: &mut dyn StepReporter,
    step: DbStep,
    error: DiagError,
) -> DbCheckReport {
    tracing::debug!("Database check aborted at {}: {:?}", step, error);
    reporter.step_failed(step, &error);
    report.failure = Some((step, error.to_string()));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum FailAt {
        Nowhere,
        Open,
        Insert,
        Delete,
        Close,
    }

    #[derive(Default)]
    struct Shared {
        records: HashMap<String, TestUser>,
        log: Vec<&'static str>,
        next_id: u32,
    }

    struct MemoryStore {
        shared: Arc<Mutex<Shared>>,
        fail_at: FailAt,
    }

    fn injected(step: &str) -> DiagError {
        DiagError::StepError {
            step: step.to_string(),
            message: "injected failure".to_string(),
        }
    }

    #[async_trait]
    impl UserStore for MemoryStore {
        async fn insert_user(&self, user: &TestUser) -> Result<String> {
            if self.fail_at == FailAt::Insert {
                return Err(injected("insert"));
            }
            let mut shared = self.shared.lock().unwrap();
            shared.next_id += 1;
            let id = format!("id-{}", shared.next_id);
            shared.records.insert(id.clone(), user.clone());
            shared.log.push("insert");
            Ok(id)
        }

        async fn delete_user(&self, id: &str) -> Result<u64> {
            if self.fail_at == FailAt::Delete {
                return Err(injected("delete"));
            }
            let mut shared = self.shared.lock().unwrap();
            shared.log.push("delete");
            Ok(shared.records.remove(id).map_or(0, |_| 1))
        }

        async fn close(&self) -> Result<()> {
            if self.fail_at == FailAt::Close {
                return Err(injected("close"));
            }
            self.shared.lock().unwrap().log.push("close");
            Ok(())
        }
    }

    struct MemoryConnector {
        shared: Arc<Mutex<Shared>>,
        fail_at: FailAt,
    }

    impl MemoryConnector {
        fn new(fail_at: FailAt) -> Self {
            Self {
                shared: Arc::new(Mutex::new(Shared::default())),
                fail_at,
            }
        }
    }

    #[async_trait]
    impl StoreConnector for MemoryConnector {
        type Store = MemoryStore;

        async fn connect(&self, _connection_string: &str) -> Result<MemoryStore> {
            if self.fail_at == FailAt::Open {
                return Err(injected("open"));
            }
            self.shared.lock().unwrap().log.push("open");
            Ok(MemoryStore {
                shared: Arc::clone(&self.shared),
                fail_at: self.fail_at,
            })
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        events: Vec<String>,
    }

    impl StepReporter for RecordingReporter {
        fn step_succeeded(&mut self, step: DbStep, _detail: &str) {
            self.events.push(format!("ok:{}", step));
        }

        fn step_failed(&mut self, step: DbStep, _error: &DiagError) {
            self.events.push(format!("err:{}", step));
        }
    }

    #[tokio::test]
    async fn test_happy_path_runs_in_order_and_leaves_nothing_behind() {
        let connector = MemoryConnector::new(FailAt::Nowhere);
        let shared = Arc::clone(&connector.shared);
        let mut reporter = RecordingReporter::default();

        let report = DbCheck::new(connector)
            .run("mongodb://localhost", &TestUser::generate(), &mut reporter)
            .await;

        assert!(report.is_success());
        assert_eq!(
            reporter.events,
            vec!["ok:open", "ok:insert", "ok:delete", "ok:close"]
        );
        let shared = shared.lock().unwrap();
        assert_eq!(shared.log, vec!["open", "insert", "delete", "close"]);
        assert!(shared.records.is_empty());
    }

    #[tokio::test]
    async fn test_open_failure_aborts_everything() {
        let connector = MemoryConnector::new(FailAt::Open);
        let shared = Arc::clone(&connector.shared);
        let mut reporter = RecordingReporter::default();

        let report = DbCheck::new(connector)
            .run("mongodb://nowhere", &TestUser::generate(), &mut reporter)
            .await;

        assert!(report.completed.is_empty());
        assert_eq!(report.failure.as_ref().map(|(s, _)| *s), Some(DbStep::Open));
        assert_eq!(reporter.events, vec!["err:open"]);
        assert!(shared.lock().unwrap().log.is_empty());
    }

    #[tokio::test]
    async fn test_insert_failure_skips_delete_and_close() {
        let connector = MemoryConnector::new(FailAt::Insert);
        let shared = Arc::clone(&connector.shared);
        let mut reporter = RecordingReporter::default();

        let report = DbCheck::new(connector)
            .run("mongodb://localhost", &TestUser::generate(), &mut reporter)
            .await;

        assert_eq!(report.completed, vec![DbStep::Open]);
        assert_eq!(report.failure.as_ref().map(|(s, _)| *s), Some(DbStep::Insert));
        assert_eq!(shared.lock().unwrap().log, vec!["open"]);
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let connector = MemoryConnector::new(FailAt::Delete);
        let mut reporter = RecordingReporter::default();

        let report = DbCheck::new(connector)
            .with_timing(true)
            .run("mongodb://localhost", &TestUser::generate(), &mut reporter)
            .await;

        assert_eq!(report.completed, vec![DbStep::Open, DbStep::Insert]);
        assert_eq!(reporter.events.last().unwrap(), "err:delete");
        assert!(!report.is_success());
    }

    #[tokio::test]
    async fn test_close_failure_is_reported() {
        let connector = MemoryConnector::new(FailAt::Close);
        let mut reporter = RecordingReporter::default();

        let report = DbCheck::new(connector)
            .run("mongodb://localhost", &TestUser::generate(), &mut reporter)
            .await;

        assert_eq!(
            report.completed,
            vec![DbStep::Open, DbStep::Insert, DbStep::Delete]
        );
        assert_eq!(report.failure.as_ref().map(|(s, _)| *s), Some(DbStep::Close));
    }
}
