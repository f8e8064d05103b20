//! Upstream resource representations, keyed the way Orthanc names them.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Patient-level tags attached to a study.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientMainTags {
    #[serde(rename = "PatientName", skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(rename = "PatientID", skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
}

/// Study-level DICOM tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyMainTags {
    #[serde(rename = "StudyInstanceUID", skip_serializing_if = "Option::is_none")]
    pub study_instance_uid: Option<String>,
    #[serde(rename = "StudyDate", skip_serializing_if = "Option::is_none")]
    pub study_date: Option<String>,
    #[serde(rename = "StudyTime", skip_serializing_if = "Option::is_none")]
    pub study_time: Option<String>,
    #[serde(rename = "StudyDescription", skip_serializing_if = "Option::is_none")]
    pub study_description: Option<String>,
    #[serde(rename = "AccessionNumber", skip_serializing_if = "Option::is_none")]
    pub accession_number: Option<String>,
}

/// Selected fields of `GET /studies/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyDetails {
    /// Upstream study identifier.
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "PatientMainDicomTags")]
    pub patient_main_tags: PatientMainTags,
    #[serde(rename = "MainDicomTags")]
    pub main_tags: StudyMainTags,
    /// Upstream series identifiers within the study.
    #[serde(rename = "Series")]
    pub series: Vec<String>,
    #[serde(rename = "IsStable")]
    pub is_stable: bool,
    #[serde(rename = "LastUpdate")]
    pub last_update: String,
    #[serde(rename = "Type")]
    pub resource_type: String,
}

/// Instance-level DICOM tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceMainTags {
    #[serde(rename = "SOPInstanceUID", skip_serializing_if = "Option::is_none")]
    pub sop_instance_uid: Option<String>,
    /// Orthanc reports this as a string.
    #[serde(rename = "InstanceNumber", skip_serializing_if = "Option::is_none")]
    pub instance_number: Option<String>,
}

/// One entry of `GET /studies/{id}/instances`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceDetails {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "MainDicomTags")]
    pub main_tags: InstanceMainTags,
    #[serde(rename = "FileSize")]
    pub file_size: i64,
    #[serde(rename = "FileUuid", alias = "FileUUID")]
    pub file_uuid: String,
    #[serde(rename = "IndexInSeries")]
    pub index_in_series: i64,
    #[serde(rename = "Type")]
    pub resource_type: String,
}

/// Rendered preview image of an instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstancePreview {
    pub data: Bytes,
    pub content_type: String,
}

/// Simplified tag map of an instance (tag name to value).
///
/// Values are usually strings; sequences come back as nested JSON.
pub type SimplifiedTags = BTreeMap<String, serde_json::Value>;
