//! In-memory PACS double that records every call.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use std::sync::Mutex;
use strata_pacs::{
    InstanceDetails, InstanceMainTags, InstancePreview, PacsClient, PacsError, PacsResult,
    SimplifiedTags, StudyDetails,
};

/// PNG signature returned as preview data.
#[allow(dead_code)]
pub const PREVIEW_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Raw file payload returned for every instance.
#[allow(dead_code)]
pub const FILE_BYTES: &[u8] = b"DICM\x02\x00\x00\x00";

/// Study id whose details always fail to load.
#[allow(dead_code)]
pub const BROKEN_STUDY: &str = "study-broken";

/// How the fake answers instance-level calls.
#[allow(dead_code)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacsMode {
    Healthy,
    /// Every instance call reports 404.
    Missing,
    /// Every instance call reports an upstream 500.
    Failing,
}

/// Recording PACS double.
#[allow(dead_code)]
pub struct FakePacs {
    mode: Mutex<PacsMode>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakePacs {
    pub fn new() -> Self {
        Self {
            mode: Mutex::new(PacsMode::Healthy),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_mode(&self, mode: PacsMode) {
        *self.mode.lock().unwrap() = mode;
    }

    /// Number of calls made for an operation.
    pub fn calls(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.as_str() == operation)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, operation: &str, id: &str) -> PacsResult<()> {
        self.calls.lock().unwrap().push(operation.to_string());
        match *self.mode.lock().unwrap() {
            PacsMode::Healthy => Ok(()),
            PacsMode::Missing => Err(PacsError::NotFound(format!("instance {id}"))),
            PacsMode::Failing => Err(PacsError::UnexpectedStatus {
                status: 500,
                url: format!("http://pacs.test/instances/{id}"),
                body: "internal error".to_string(),
            }),
        }
    }
}

fn instance(id: &str, index: i64) -> InstanceDetails {
    InstanceDetails {
        id: id.to_string(),
        main_tags: InstanceMainTags {
            sop_instance_uid: Some(format!("1.2.840.99.{index}")),
            instance_number: Some(index.to_string()),
        },
        file_size: 512,
        file_uuid: format!("uuid-{id}"),
        index_in_series: index,
        resource_type: "Instance".to_string(),
    }
}

#[async_trait]
impl PacsClient for FakePacs {
    async fn list_studies(&self) -> PacsResult<Vec<String>> {
        self.calls.lock().unwrap().push("list_studies".to_string());
        Ok(vec![
            "study-a".to_string(),
            BROKEN_STUDY.to_string(),
            "study-b".to_string(),
        ])
    }

    async fn get_study_details(&self, study_id: &str) -> PacsResult<StudyDetails> {
        self.calls.lock().unwrap().push("study_details".to_string());
        if study_id == BROKEN_STUDY {
            return Err(PacsError::Decode("truncated study document".to_string()));
        }
        Ok(StudyDetails {
            id: study_id.to_string(),
            series: vec![format!("{study_id}-series-1")],
            is_stable: true,
            resource_type: "Study".to_string(),
            ..Default::default()
        })
    }

    async fn get_study_instances(&self, study_id: &str) -> PacsResult<Vec<InstanceDetails>> {
        self.record("instances", study_id)?;
        Ok(vec![instance("inst-1", 1), instance("inst-2", 2)])
    }

    async fn get_instance_preview(&self, instance_id: &str) -> PacsResult<InstancePreview> {
        self.record("preview", instance_id)?;
        Ok(InstancePreview {
            data: Bytes::from_static(PREVIEW_BYTES),
            content_type: "image/png".to_string(),
        })
    }

    async fn get_instance_simplified_tags(&self, instance_id: &str) -> PacsResult<SimplifiedTags> {
        self.record("simplified_tags", instance_id)?;
        let mut tags = SimplifiedTags::new();
        tags.insert("PatientName".to_string(), json!("DOE^JANE"));
        tags.insert("Modality".to_string(), json!("MR"));
        tags.insert("SOPInstanceUID".to_string(), json!(instance_id));
        Ok(tags)
    }

    async fn get_instance_file(&self, instance_id: &str) -> PacsResult<Bytes> {
        self.record("file", instance_id)?;
        Ok(Bytes::from_static(FILE_BYTES))
    }

    async fn health_check(&self) -> PacsResult<()> {
        self.calls.lock().unwrap().push("health".to_string());
        Ok(())
    }
}
