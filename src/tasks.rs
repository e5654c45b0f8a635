use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::pipeline::{Analysis, AnalysisField, AnalysisResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskState {
    Pending,
    Completed {
        analysis: AnalysisResult,
        degraded_fields: Vec<AnalysisField>,
    },
    Failed {
        error: String,
    },
}

impl TaskState {
    pub fn is_finished(&self) -> bool {
        !matches!(self, TaskState::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_id: String,
    pub fund_name: String,
    pub submitted_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub state: TaskState,
}

#[derive(Default)]
struct TaskMap {
    records: HashMap<String, TaskRecord>,
    order: VecDeque<String>,
}

impl TaskMap {
    /// Drops the oldest finished record, or the oldest record if none has finished.
    fn evict_one(&mut self) {
        let position = self
            .order
            .iter()
            .position(|id| self.records.get(id).is_some_and(|r| r.state.is_finished()))
            .unwrap_or(0);

        if let Some(id) = self.order.remove(position) {
            self.records.remove(&id);
            tracing::debug!(task_id = %id, "Evicted background analysis");
        }
    }
}

/// In-memory results of background analyses, bounded to `capacity` entries.
/// Nothing survives a restart.
#[derive(Clone)]
pub struct TaskStore {
    inner: Arc<RwLock<TaskMap>>,
    capacity: usize,
}

impl TaskStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TaskMap::default())),
            capacity: capacity.max(1),
        }
    }

    pub async fn insert_pending(&self, fund_name: &str) -> TaskRecord {
        let record = TaskRecord {
            task_id: format!("task_{}", Uuid::new_v4().simple()),
            fund_name: fund_name.to_string(),
            submitted_at: Utc::now(),
            finished_at: None,
            state: TaskState::Pending,
        };

        let mut map = self.inner.write().await;
        while map.records.len() >= self.capacity {
            map.evict_one();
        }
        map.order.push_back(record.task_id.clone());
        map.records.insert(record.task_id.clone(), record.clone());

        record
    }

    pub async fn complete(&self, task_id: &str, analysis: Analysis) {
        self.finish(
            task_id,
            TaskState::Completed {
                analysis: analysis.result,
                degraded_fields: analysis.degraded_fields,
            },
        )
        .await;
    }

    pub async fn fail(&self, task_id: &str, error: String) {
        self.finish(task_id, TaskState::Failed { error }).await;
    }

    async fn finish(&self, task_id: &str, state: TaskState) {
        let mut map = self.inner.write().await;
        match map.records.get_mut(task_id) {
            Some(record) => {
                record.state = state;
                record.finished_at = Some(Utc::now());
            }
            None => tracing::warn!(task_id, "Finished task was already evicted"),
        }
    }

    pub async fn get(&self, task_id: &str) -> Option<TaskRecord> {
        self.inner.read().await.records.get(task_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(name: &str) -> Analysis {
        Analysis {
            fund_name: name.to_string(),
            result: AnalysisResult {
                fund_analysis: "f".to_string(),
                sentiment_analysis: "s".to_string(),
                macro_analysis: "m".to_string(),
                final_report: "r".to_string(),
            },
            degraded_fields: vec![AnalysisField::MacroAnalysis],
        }
    }

    #[tokio::test]
    async fn test_pending_then_completed() {
        let store = TaskStore::new(10);
        let record = store.insert_pending("HDFC Top 100 Fund").await;

        assert!(record.task_id.starts_with("task_"));
        assert_eq!(store.get(&record.task_id).await.unwrap().state, TaskState::Pending);

        store.complete(&record.task_id, analysis("HDFC Top 100 Fund")).await;

        let done = store.get(&record.task_id).await.unwrap();
        assert!(done.finished_at.is_some());
        match done.state {
            TaskState::Completed {
                analysis,
                degraded_fields,
            } => {
                assert_eq!(analysis.final_report, "r");
                assert_eq!(degraded_fields, vec![AnalysisField::MacroAnalysis]);
            }
            other => panic!("expected completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_task_keeps_error() {
        let store = TaskStore::new(10);
        let record = store.insert_pending("SBI Small Cap Fund").await;
        store.fail(&record.task_id, "Analysis failed: boom".to_string()).await;

        let failed = store.get(&record.task_id).await.unwrap();
        assert_eq!(
            failed.state,
            TaskState::Failed {
                error: "Analysis failed: boom".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest_finished_first() {
        let store = TaskStore::new(2);
        let first = store.insert_pending("one").await;
        let second = store.insert_pending("two").await;
        store.complete(&second.task_id, analysis("two")).await;

        let third = store.insert_pending("three").await;

        assert_eq!(store.len().await, 2);
        assert!(store.get(&first.task_id).await.is_some());
        assert!(store.get(&second.task_id).await.is_none());
        assert!(store.get(&third.task_id).await.is_some());
    }

    #[tokio::test]
    async fn test_unknown_task_is_none_and_finish_is_noop() {
        let store = TaskStore::new(1);
        assert!(store.get("task_missing").await.is_none());
        store.fail("task_missing", "x".to_string()).await;
        assert_eq!(store.len().await, 0);
    }

    #[test]
    fn test_record_serializes_flat_state() {
        let record = TaskRecord {
            task_id: "task_1".to_string(),
            fund_name: "Axis Bluechip Fund".to_string(),
            submitted_at: Utc::now(),
            finished_at: None,
            state: TaskState::Pending,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["state"], "pending");
        assert_eq!(value["task_id"], "task_1");
    }
}
