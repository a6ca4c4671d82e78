use std::{
    collections::{BTreeMap, HashSet},
    ffi::OsString,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{io::AsyncWriteExt, sync::Mutex};
use uuid::Uuid;

use crate::{
    errors::AppResult,
    models::{
        domain::{question_identity, CandidateQuestion, QuizResultSummary, TopicHistory},
        dto::TopicStats,
    },
};

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Records the identities of `questions` and returns how many were new.
    async fn record_served(&self, topic: &str, questions: &[CandidateQuestion]) -> AppResult<usize>;
    async fn append_result(&self, topic: &str, summary: QuizResultSummary) -> AppResult<()>;
    async fn get_stats(&self, topic: &str) -> AppResult<TopicStats>;
    async fn list_topics(&self) -> AppResult<Vec<String>>;
    /// Drops one topic, or every topic when `topic` is `None`.
    async fn clear(&self, topic: Option<&str>) -> AppResult<()>;
    async fn served_identities(&self, topic: &str) -> AppResult<HashSet<String>>;

    async fn is_question_served(&self, topic: &str, question_text: &str) -> AppResult<bool> {
        let identities = self.served_identities(topic).await?;
        Ok(identities.contains(&question_identity(topic, question_text)))
    }
}

/// Identities of the questions that carry text, in order.
pub fn identities_for(topic: &str, questions: &[CandidateQuestion]) -> Vec<String> {
    questions
        .iter()
        .filter(|q| !q.question_text.trim().is_empty())
        .map(|q| question_identity(topic, &q.question_text))
        .collect()
}

/// History kept in a single JSON document keyed by topic.
///
/// The document is loaded once in [`JsonHistoryRepository::open`]. Every
/// mutation holds the store mutex across read-modify-persist and replaces the
/// file through a temp file + rename.
pub struct JsonHistoryRepository {
    path: PathBuf,
    histories: Mutex<BTreeMap<String, TopicHistory>>,
}

impl JsonHistoryRepository {
    /// Opens the store at `path`. Missing or unreadable files yield an empty
    /// history; this never fails.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let histories = Self::load(&path).await;
        log::info!(
            "Loaded question history for {} topic(s) from {}",
            histories.len(),
            path.display()
        );
        Self {
            path,
            histories: Mutex::new(histories),
        }
    }

    async fn load(path: &Path) -> BTreeMap<String, TopicHistory> {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No question history at {}, starting empty", path.display());
                return BTreeMap::new();
            }
            Err(err) => {
                log::warn!(
                    "Could not read question history {}: {}; starting with an empty history",
                    path.display(),
                    err
                );
                return BTreeMap::new();
            }
        };

        let documents = match serde_json::from_str::<BTreeMap<String, serde_json::Value>>(&raw) {
            Ok(documents) => documents,
            Err(err) => {
                log::warn!(
                    "Question history {} is corrupt ({}); starting with an empty history",
                    path.display(),
                    err
                );
                return BTreeMap::new();
            }
        };

        documents
            .into_iter()
            .filter_map(|(topic, document)| {
                match serde_json::from_value::<TopicHistory>(document) {
                    Ok(mut history) => {
                        history.repair();
                        Some((topic, history))
                    }
                    Err(err) => {
                        log::warn!(
                            "Skipping unreadable history for topic '{}' in {}: {}",
                            topic,
                            path.display(),
                            err
                        );
                        None
                    }
                }
            })
            .collect()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("question_history.json"));
        name.push(format!(".{}.tmp", Uuid::new_v4()));
        self.path.with_file_name(name)
    }

    async fn persist(&self, histories: &BTreeMap<String, TopicHistory>) -> AppResult<()> {
        let payload = serde_json::to_vec_pretty(histories)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = self.temp_path();
        let written = async {
            let mut file = tokio::fs::File::create(&temp_path).await?;
            file.write_all(&payload).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&temp_path, &self.path).await
        }
        .await;

        if let Err(err) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
                log::debug!("Could not remove temp file {}: {}", temp_path.display(), cleanup);
            }
            return Err(err.into());
        }

        Ok(())
    }

    /// Applies `mutate` to a copy of the state, persists it, then commits it.
    /// On a failed write the in-memory state is left untouched.
    async fn mutate<F, T>(&self, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut BTreeMap<String, TopicHistory>) -> T + Send,
        T: Send,
    {
        let mut histories = self.histories.lock().await;
        let mut updated = histories.clone();
        let output = mutate(&mut updated);
        self.persist(&updated).await?;
        *histories = updated;
        Ok(output)
    }
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn record_served(&self, topic: &str, questions: &[CandidateQuestion]) -> AppResult<usize> {
        let identities = identities_for(topic, questions);
        let added = self
            .mutate(|histories| {
                histories
                    .entry(topic.to_string())
                    .or_default()
                    .record_identities(identities)
            })
            .await?;

        log::debug!("Recorded {} new question(s) for topic '{}'", added, topic);
        Ok(added)
    }

    async fn append_result(&self, topic: &str, summary: QuizResultSummary) -> AppResult<()> {
        self.mutate(|histories| {
            histories
                .entry(topic.to_string())
                .or_default()
                .append_result(summary)
        })
        .await
    }

    async fn get_stats(&self, topic: &str) -> AppResult<TopicStats> {
        let histories = self.histories.lock().await;
        Ok(histories
            .get(topic)
            .map(|history| TopicStats::from_history(topic, history))
            .unwrap_or_else(|| TopicStats::empty(topic)))
    }

    async fn list_topics(&self) -> AppResult<Vec<String>> {
        let histories = self.histories.lock().await;
        Ok(histories.keys().cloned().collect())
    }

    async fn clear(&self, topic: Option<&str>) -> AppResult<()> {
        match topic {
            Some(topic) => {
                let exists = self.histories.lock().await.contains_key(topic);
                if !exists {
                    return Ok(());
                }
                self.mutate(|histories| {
                    histories.remove(topic);
                })
                .await?;
                log::debug!("Cleared question history for topic '{}'", topic);
            }
            None => {
                self.mutate(|histories| histories.clear()).await?;
                log::debug!("Cleared question history for all topics");
            }
        }
        Ok(())
    }

    async fn served_identities(&self, topic: &str) -> AppResult<HashSet<String>> {
        let histories = self.histories.lock().await;
        Ok(histories
            .get(topic)
            .map(|history| history.question_hashes.iter().cloned().collect())
            .unwrap_or_default())
    }
}
