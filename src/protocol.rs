//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Area, Question};
use crate::stages::StageConfig;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewQuestion {
        stage: String,
        #[serde(default)]
        character: Option<String>,
        #[serde(default)]
        difficulty: Option<String>,
    },
    StageLabels {
        stage: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Question {
        question: Question,
    },
    StageLabels {
        #[serde(rename = "stageId")]
        stage_id: String,
        labels: Vec<&'static str>,
    },
    Error {
        message: String,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Default, Deserialize)]
pub struct QuestionQuery {
    pub stage: String,
    pub character: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LabelsOut {
    #[serde(rename = "stageId")]
    pub stage_id: String,
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct StageSummaryOut {
    pub id: String,
    pub area: Area,
    pub labels: Vec<&'static str>,
}

impl From<&StageConfig> for StageSummaryOut {
    fn from(stage: &StageConfig) -> Self {
        Self { id: stage.id.clone(), area: stage.area, labels: stage.labels() }
    }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}
