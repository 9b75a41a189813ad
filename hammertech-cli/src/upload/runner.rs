//! Upload run controller
//!
//! Authenticates, loads the sheet, then walks the rows strictly in order:
//! map, upload, record the outcome. Only authentication and workbook
//! loading can stop a run; a failing row is logged and the loop moves on.

use std::path::PathBuf;

use log::{debug, info, warn};
use serde::Serialize;

use crate::api::{AuthError, Authenticator, Credentials, Operation, ResourceClient, ResourceKind};

use super::excel::{WorkbookError, read_sheet_rows};
use super::mapping::{RowMapping, map_row};

/// Default first data row (row 1 holds the header)
pub const DEFAULT_START_ROW: usize = 2;

/// Fatal errors. Nothing has been uploaded when one of these is returned.
#[derive(Debug)]
pub enum RunError {
    Auth(AuthError),
    Workbook(WorkbookError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Auth(err) => write!(f, "Authentication failed: {}", err),
            RunError::Workbook(err) => write!(f, "Failed to load workbook: {}", err),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Auth(err) => Some(err),
            RunError::Workbook(err) => Some(err),
        }
    }
}

/// Whether rows are actually sent
#[derive(Debug, Clone)]
pub enum RunMode {
    Upload(Credentials),
    /// Map rows and report the payloads without authenticating or sending
    DryRun,
}

/// Everything one run needs
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub kind: ResourceKind,
    pub workbook: PathBuf,
    pub sheet: String,
    /// 1-based; rows above it are ignored
    pub start_row: usize,
    pub mode: RunMode,
}

/// Where the run currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Authenticating,
    Loading,
    Iterating { row: usize },
    Completed,
    Failed,
}

/// How a single row ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowStatus {
    Success { status_code: u16 },
    Failed { status_code: u16, body: String },
    Error { message: String },
    /// Dry run: the payload that would have been sent
    Previewed { payload: serde_json::Value },
}

/// Log entry for one processed row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowOutcome {
    pub row: usize,
    pub kind: ResourceKind,
    pub label: String,
    #[serde(flatten)]
    pub status: RowStatus,
}

impl RowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self.status,
            RowStatus::Success { .. } | RowStatus::Previewed { .. }
        )
    }
}

impl std::fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.status {
            RowStatus::Success { status_code } => {
                write!(f, "Row {}: Success (HTTP {}).", self.row, status_code)
            }
            RowStatus::Failed { status_code, body } => write!(
                f,
                "Row {}: Failed (HTTP {}). Response: {}",
                self.row, status_code, body
            ),
            RowStatus::Error { message } => write!(
                f,
                "Row {}: Error sending {}: {}",
                self.row,
                self.kind.noun(),
                message
            ),
            RowStatus::Previewed { payload } => write!(
                f,
                "Row {}: Would send {} {}: {}",
                self.row,
                self.kind.noun(),
                self.label,
                payload
            ),
        }
    }
}

/// Totals and log of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub kind: ResourceKind,
    pub dry_run: bool,
    pub rows_processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub log: Vec<RowOutcome>,
}

impl RunResult {
    fn new(kind: ResourceKind, dry_run: bool) -> Self {
        Self {
            kind,
            dry_run,
            rows_processed: 0,
            succeeded: 0,
            failed: 0,
            log: Vec::new(),
        }
    }

    fn record(&mut self, outcome: RowOutcome) {
        self.rows_processed += 1;
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.log.push(outcome);
    }

    /// Log as display lines, in row order
    pub fn log_lines(&self) -> Vec<String> {
        self.log.iter().map(|o| o.to_string()).collect()
    }
}

/// Progress through the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub row: usize,
    pub total_rows: usize,
}

impl Progress {
    /// Fraction of the sheet covered so far, clamped to 1.0
    pub fn fraction(&self) -> f64 {
        if self.total_rows == 0 {
            1.0
        } else {
            (self.row as f64 / self.total_rows as f64).min(1.0)
        }
    }
}

/// Receives run events. All methods default to doing nothing.
pub trait RunObserver {
    fn on_phase(&mut self, _phase: &RunPhase) {}
    fn on_row_started(&mut self, _row: usize, _kind: ResourceKind, _label: &str) {}
    fn on_row_finished(&mut self, _outcome: &RowOutcome, _progress: Progress) {}
}

/// Observer that ignores everything
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Sequential uploader for one sheet
pub struct UploadRunner<A, C> {
    authenticator: A,
    client: C,
}

impl<A: Authenticator, C: ResourceClient> UploadRunner<A, C> {
    pub fn new(authenticator: A, client: C) -> Self {
        Self {
            authenticator,
            client,
        }
    }

    /// Execute a run. Returns `Err` only for the two fatal cases.
    pub async fn run(
        &self,
        request: &UploadRequest,
        observer: &mut dyn RunObserver,
    ) -> Result<RunResult, RunError> {
        observer.on_phase(&RunPhase::Idle);

        let token = match &request.mode {
            RunMode::Upload(credentials) => {
                observer.on_phase(&RunPhase::Authenticating);
                match self.authenticator.authenticate(credentials).await {
                    Ok(token) => Some(token),
                    Err(err) => {
                        warn!("Authentication failed: {}", err);
                        observer.on_phase(&RunPhase::Failed);
                        return Err(RunError::Auth(err));
                    }
                }
            }
            RunMode::DryRun => None,
        };

        observer.on_phase(&RunPhase::Loading);
        let sheet = match read_sheet_rows(&request.workbook, &request.sheet, request.start_row) {
            Ok(sheet) => sheet,
            Err(err) => {
                warn!("Failed to load workbook: {}", err);
                observer.on_phase(&RunPhase::Failed);
                return Err(RunError::Workbook(err));
            }
        };
        info!(
            "Uploading {} from sheet '{}' ({} candidate rows)",
            request.kind,
            sheet.sheet_name,
            sheet.rows.len()
        );

        let mut result = RunResult::new(request.kind, token.is_none());

        for row in &sheet.rows {
            let payload = match map_row(row, request.kind) {
                RowMapping::Payload(payload) => payload,
                RowMapping::Skip => {
                    debug!("Row {}: blank, skipped", row.number);
                    continue;
                }
            };

            observer.on_phase(&RunPhase::Iterating { row: row.number });
            let label = payload.label();
            observer.on_row_started(row.number, request.kind, &label);

            let status = match payload.to_json() {
                Err(err) => RowStatus::Error {
                    message: format!("failed to build payload: {}", err),
                },
                Ok(data) => match &token {
                    None => RowStatus::Previewed { payload: data },
                    Some(token) => {
                        let operation = Operation::create(payload.kind(), data);
                        match self.client.execute(token, &operation).await {
                            Ok(response) if response.is_success() => RowStatus::Success {
                                status_code: response.status_code,
                            },
                            Ok(response) => RowStatus::Failed {
                                status_code: response.status_code,
                                body: response.body,
                            },
                            Err(err) => RowStatus::Error {
                                message: format!("{:#}", err),
                            },
                        }
                    }
                },
            };

            let outcome = RowOutcome {
                row: row.number,
                kind: request.kind,
                label,
                status,
            };
            if !outcome.is_success() {
                warn!("{}", outcome);
            }

            observer.on_row_finished(
                &outcome,
                Progress {
                    row: row.number,
                    total_rows: sheet.total_rows,
                },
            );
            result.record(outcome);
        }

        info!(
            "Run complete: {} processed, {} succeeded, {} failed",
            result.rows_processed, result.succeeded, result.failed
        );
        observer.on_phase(&RunPhase::Completed);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{OperationResult, Region, Token};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use rust_xlsxwriter::Workbook;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Authenticator returning a fixed answer
    struct FakeAuth {
        status: Option<u16>,
    }

    #[async_trait]
    impl Authenticator for FakeAuth {
        async fn authenticate(&self, _credentials: &Credentials) -> Result<Token, AuthError> {
            match self.status {
                None => Ok(Token::new("test-token")),
                Some(status) => Err(AuthError::Status {
                    status,
                    body: String::new(),
                }),
            }
        }
    }

    enum Reply {
        Status(u16, &'static str),
        NetworkError,
    }

    /// Client replaying scripted replies and recording what it was sent
    struct FakeClient {
        replies: Mutex<VecDeque<Reply>>,
        sent: Arc<Mutex<Vec<Operation>>>,
    }

    impl FakeClient {
        fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl ResourceClient for FakeClient {
        async fn execute(
            &self,
            token: &Token,
            operation: &Operation,
        ) -> anyhow::Result<OperationResult> {
            assert_eq!(token.as_str(), "test-token");
            self.sent.lock().unwrap().push(operation.clone());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Reply::Status(201, "{}"));
            match reply {
                Reply::Status(status, body) => Ok(OperationResult::from_response(
                    operation.clone(),
                    status,
                    body.to_string(),
                )),
                Reply::NetworkError => Err(anyhow!("connection refused")),
            }
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        phases: Vec<RunPhase>,
        finished: Vec<Progress>,
    }

    impl RunObserver for RecordingObserver {
        fn on_phase(&mut self, phase: &RunPhase) {
            self.phases.push(phase.clone());
        }

        fn on_row_finished(&mut self, _outcome: &RowOutcome, progress: Progress) {
            self.finished.push(progress);
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "admin@example.com".into(),
            password: "secret".into(),
            tenant: "acme".into(),
            region: Region::NorthAmerica,
        }
    }

    /// Users sheet: header, three users, a blank row, a row without email
    fn users_workbook() -> PathBuf {
        let path = std::env::temp_dir().join(format!("runner-{}.xlsx", uuid::Uuid::new_v4()));
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Users").unwrap();
        for (col, title) in ["Email", "Full Name", "Phone"].iter().enumerate() {
            sheet.write_string(0, col as u16, *title).unwrap();
        }
        sheet.write_string(1, 0, "one@example.com").unwrap();
        sheet.write_string(1, 1, "User One").unwrap();
        sheet.write_number(1, 2, 5551234567.0).unwrap();
        sheet.write_string(2, 0, "two@example.com").unwrap();
        sheet.write_string(2, 1, "User Two").unwrap();
        // row 4 left blank
        sheet.write_string(4, 1, "No Email").unwrap();
        sheet.write_string(5, 0, "three@example.com").unwrap();
        sheet.write_string(5, 1, "User Three").unwrap();
        workbook.save(&path).unwrap();
        path
    }

    fn request(path: &PathBuf, mode: RunMode) -> UploadRequest {
        UploadRequest {
            kind: ResourceKind::Users,
            workbook: path.clone(),
            sheet: "Users".into(),
            start_row: DEFAULT_START_ROW,
            mode,
        }
    }

    #[tokio::test]
    async fn test_successful_run_skips_blank_rows() {
        let path = users_workbook();
        let client = FakeClient::new(vec![]);
        let sent = client.sent.clone();
        let runner = UploadRunner::new(FakeAuth { status: None }, client);
        let mut observer = RecordingObserver::default();

        let result = runner
            .run(&request(&path, RunMode::Upload(credentials())), &mut observer)
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(result.rows_processed, 3);
        assert_eq!(result.succeeded, 3);
        assert_eq!(result.failed, 0);
        let rows: Vec<usize> = result.log.iter().map(|o| o.row).collect();
        assert_eq!(rows, vec![2, 3, 6]);

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].resource, ResourceKind::Users);
        assert_eq!(sent[0].data["mobile"], "5551234567");
        assert_eq!(sent[0].data["roleNames"][0], "safetymanager");

        assert_eq!(observer.phases.first(), Some(&RunPhase::Idle));
        assert_eq!(observer.phases.get(1), Some(&RunPhase::Authenticating));
        assert_eq!(observer.phases.last(), Some(&RunPhase::Completed));
        assert_eq!(observer.finished.last().map(|p| p.fraction()), Some(1.0));
    }

    #[tokio::test]
    async fn test_server_error_is_counted_and_run_continues() {
        let path = users_workbook();
        let client = FakeClient::new(vec![
            Reply::Status(500, "server error"),
            Reply::Status(201, "{}"),
            Reply::Status(200, "{}"),
        ]);
        let runner = UploadRunner::new(FakeAuth { status: None }, client);

        let result = runner
            .run(&request(&path, RunMode::Upload(credentials())), &mut NoopObserver)
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(result.rows_processed, 3);
        assert_eq!(result.failed, 1);
        assert_eq!(result.succeeded, 2);
        assert_eq!(
            result.log[0].to_string(),
            "Row 2: Failed (HTTP 500). Response: server error"
        );
        assert_eq!(result.log[1].to_string(), "Row 3: Success (HTTP 201).");
        assert_eq!(result.succeeded + result.failed, result.rows_processed);
    }

    #[tokio::test]
    async fn test_network_error_is_recovered() {
        let path = users_workbook();
        let client = FakeClient::new(vec![Reply::Status(201, "{}"), Reply::NetworkError]);
        let runner = UploadRunner::new(FakeAuth { status: None }, client);

        let result = runner
            .run(&request(&path, RunMode::Upload(credentials())), &mut NoopObserver)
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(result.rows_processed, 3);
        assert_eq!(result.succeeded, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(
            result.log[1].to_string(),
            "Row 3: Error sending user: connection refused"
        );
    }

    #[tokio::test]
    async fn test_auth_failure_stops_run() {
        let path = users_workbook();
        let client = FakeClient::new(vec![]);
        let sent = client.sent.clone();
        let runner = UploadRunner::new(FakeAuth { status: Some(401) }, client);
        let mut observer = RecordingObserver::default();

        let err = runner
            .run(&request(&path, RunMode::Upload(credentials())), &mut observer)
            .await
            .unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            err,
            RunError::Auth(AuthError::Status { status: 401, .. })
        ));
        assert!(sent.lock().unwrap().is_empty());
        assert!(observer.finished.is_empty());
        assert_eq!(observer.phases.last(), Some(&RunPhase::Failed));
    }

    #[tokio::test]
    async fn test_missing_sheet_stops_run() {
        let path = users_workbook();
        let client = FakeClient::new(vec![]);
        let sent = client.sent.clone();
        let runner = UploadRunner::new(FakeAuth { status: None }, client);
        let mut req = request(&path, RunMode::Upload(credentials()));
        req.sheet = "Sheet1".into();

        let err = runner.run(&req, &mut NoopObserver).await.unwrap_err();
        std::fs::remove_file(&path).ok();

        match err {
            RunError::Workbook(WorkbookError::SheetNotFound { sheet, available }) => {
                assert_eq!(sheet, "Sheet1");
                assert_eq!(available, vec!["Users".to_string()]);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_start_row_skips_earlier_rows() {
        let path = users_workbook();
        let client = FakeClient::new(vec![]);
        let runner = UploadRunner::new(FakeAuth { status: None }, client);
        let mut req = request(&path, RunMode::Upload(credentials()));
        req.start_row = 4;

        let result = runner.run(&req, &mut NoopObserver).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(result.rows_processed, 1);
        assert_eq!(result.log[0].row, 6);
    }

    #[tokio::test]
    async fn test_dry_run_does_not_authenticate_or_send() {
        let path = users_workbook();
        let client = FakeClient::new(vec![]);
        let sent = client.sent.clone();
        // Would fail if it were called
        let runner = UploadRunner::new(FakeAuth { status: Some(401) }, client);

        let result = runner
            .run(&request(&path, RunMode::DryRun), &mut NoopObserver)
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert!(result.dry_run);
        assert_eq!(result.rows_processed, 3);
        assert_eq!(result.succeeded, 3);
        assert!(sent.lock().unwrap().is_empty());
        match &result.log[0].status {
            RowStatus::Previewed { payload } => assert_eq!(payload["email"], "one@example.com"),
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[test]
    fn test_run_result_serializes_flat_status() {
        let mut result = RunResult::new(ResourceKind::Projects, false);
        result.record(RowOutcome {
            row: 2,
            kind: ResourceKind::Projects,
            label: "Tower A".into(),
            status: RowStatus::Failed {
                status_code: 422,
                body: "bad".into(),
            },
        });

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["failed"], 1);
        assert_eq!(value["log"][0]["status"], "failed");
        assert_eq!(value["log"][0]["status_code"], 422);
        assert_eq!(value["log"][0]["kind"], "projects");
    }
}
