//! Offline intake: each application becomes a JSON file in a directory.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use kyc_core::{ApplicationPayload, IntakeGateway, IntakeResponse, SubmissionError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the outbox writes for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboxRecord {
    pub application_id: String,
    pub submitted_at: DateTime<Utc>,
    pub application: ApplicationPayload,
}

pub struct OutboxIntake {
    dir: PathBuf,
}

impl OutboxIntake {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, application_id: &str) -> PathBuf {
        self.dir.join(format!("{application_id}.json"))
    }

    /// Records currently waiting in the outbox, oldest first.
    pub fn pending(&self) -> Result<Vec<OutboxRecord>, SubmissionError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(outbox_error)? {
            let path = entry.map_err(outbox_error)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let data = fs::read_to_string(&path).map_err(outbox_error)?;
            let record: OutboxRecord = serde_json::from_str(&data)
                .map_err(|err| SubmissionError::InvalidResponse(err.to_string()))?;
            records.push(record);
        }
        records.sort_by_key(|record| record.submitted_at);
        Ok(records)
    }

    fn write_record(&self, record: &OutboxRecord) -> Result<(), SubmissionError> {
        fs::create_dir_all(&self.dir).map_err(outbox_error)?;
        let json = serde_json::to_string_pretty(record)
            .map_err(|err| SubmissionError::InvalidResponse(err.to_string()))?;
        let path = self.record_path(&record.application_id);
        let tmp = path.with_extension("json.tmp");
        let mut file = File::create(&tmp).map_err(outbox_error)?;
        file.write_all(json.as_bytes()).map_err(outbox_error)?;
        file.flush().map_err(outbox_error)?;
        fs::rename(&tmp, &path).map_err(outbox_error)?;
        Ok(())
    }
}

impl IntakeGateway for OutboxIntake {
    fn submit(&self, payload: &ApplicationPayload) -> Result<IntakeResponse, SubmissionError> {
        let record = OutboxRecord {
            application_id: Uuid::new_v4().to_string(),
            submitted_at: Utc::now(),
            application: payload.clone(),
        };
        self.write_record(&record)?;
        tracing::info!(
            application_id = %record.application_id,
            dir = %self.dir.display(),
            "Application written to outbox"
        );
        Ok(IntakeResponse::accepted(record.application_id))
    }
}

fn outbox_error(err: std::io::Error) -> SubmissionError {
    SubmissionError::Network(format!("outbox unavailable: {err}"))
}
