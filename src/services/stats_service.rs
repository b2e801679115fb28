use crate::error::Result;
use crate::models::quiz_stats::{QuizStats, StatsSummary, RECENT_QUIZ_LIMIT};
use crate::services::quiz_events::QuizEventBus;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{broadcast::error::RecvError, RwLock};
use tokio::task::JoinHandle;

const POINTS_PER_CORRECT_ANSWER: u64 = 50;

/// Aggregates quiz-completion events into the dashboard summary.
#[derive(Clone)]
pub struct StatsService {
    summary: Arc<RwLock<StatsSummary>>,
    store_path: Option<PathBuf>,
}

impl StatsService {
    pub fn new(store_path: Option<PathBuf>) -> Self {
        Self {
            summary: Arc::new(RwLock::new(StatsSummary::default())),
            store_path,
        }
    }

    /// Reads a previously saved summary. A missing or unreadable file keeps the defaults.
    pub async fn load(&self) {
        let Some(path) = &self.store_path else { return };

        let raw = match fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "could not read stats file");
                return;
            }
        };

        match serde_json::from_str::<StatsSummary>(&raw) {
            Ok(mut saved) => {
                saved.recent_quizzes.truncate(RECENT_QUIZ_LIMIT);
                tracing::info!(
                    quizzes = saved.total_quizzes_completed,
                    average = saved.average_accuracy,
                    "loaded stats"
                );
                *self.summary.write().await = saved;
            }
            Err(e) => tracing::warn!(error = %e, "stats file is not valid JSON, starting fresh"),
        }
    }

    pub async fn summary(&self) -> StatsSummary {
        self.summary.read().await.clone()
    }

    /// Folds one event into the summary and persists it. Progress events are ignored.
    pub async fn record(&self, event: QuizStats) -> Result<StatsSummary> {
        if !event.is_completed {
            tracing::debug!(section = %event.section_name, "ignoring quiz progress event");
            return Ok(self.summary().await);
        }

        let snapshot = {
            let mut s = self.summary.write().await;

            s.total_quizzes_completed = s.total_quizzes_completed.saturating_add(1);
            s.total_questions_answered =
                s.total_questions_answered.saturating_add(event.total_questions);
            s.total_subjects = event.total_quizzes;
            s.total_points = s
                .total_points
                .saturating_add(u64::from(event.score) * POINTS_PER_CORRECT_ANSWER);

            let window_total: f64 = s.recent_quizzes.iter().map(|q| q.accuracy).sum();
            s.average_accuracy = (window_total + event.accuracy) / (s.recent_quizzes.len() + 1) as f64;

            s.last_quiz_result = event.section_name.clone();
            s.last_quiz_accuracy = Some(format!("{:.1}%", event.accuracy));
            s.last_quiz_score = Some(format!("{}/{}", event.score, event.total_questions));

            s.recent_quizzes.insert(0, event);
            s.recent_quizzes.truncate(RECENT_QUIZ_LIMIT);

            s.current_streak = s.total_quizzes_completed;
            s.daily_progress = s.average_accuracy / 100.0;
            s.clone()
        };

        self.save(&snapshot).await?;
        Ok(snapshot)
    }

    async fn save(&self, summary: &StatsSummary) -> Result<()> {
        let Some(path) = &self.store_path else { return Ok(()) };
        let json = serde_json::to_string_pretty(summary)?;
        fs::write(path, json).await?;
        tracing::debug!(path = %path.display(), "saved stats");
        Ok(())
    }

    /// Spawns the subscriber that feeds bus events into `record`.
    pub fn spawn_listener(&self, bus: &QuizEventBus) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        let stats = self.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        if let Err(e) = stats.record(event).await {
                            tracing::error!(error = ?e, "failed to record quiz stats");
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "stats listener fell behind, events dropped");
                    }
                    Err(RecvError::Closed) => {
                        tracing::info!("quiz event bus closed, stats listener exiting");
                        break;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(name: &str, score: u32, total: u32) -> QuizStats {
        QuizStats {
            section_name: name.into(),
            score,
            total_questions: total,
            total_quizzes: 2,
            accuracy: score as f64 * 100.0 / total as f64,
            difficulty: "medium".into(),
            is_completed: true,
            current_question_index: total.saturating_sub(1),
        }
    }

    #[tokio::test]
    async fn aggregates_completed_quizzes() {
        let stats = StatsService::new(None);
        stats.record(completed("Algebra Quiz", 4, 5)).await.unwrap();
        let s = stats.record(completed("History Quiz", 1, 2)).await.unwrap();

        assert_eq!(s.total_quizzes_completed, 2);
        assert_eq!(s.total_questions_answered, 7);
        assert_eq!(s.total_points, 250);
        assert_eq!(s.current_streak, 2);
        assert_eq!(s.total_subjects, 2);
        assert!((s.average_accuracy - 65.0).abs() < 1e-9);
        assert!((s.daily_progress - 0.65).abs() < 1e-9);
        assert_eq!(s.last_quiz_result, "History Quiz");
        assert_eq!(s.last_quiz_score.as_deref(), Some("1/2"));
        assert_eq!(s.last_quiz_accuracy.as_deref(), Some("50.0%"));
        assert_eq!(s.recent_quizzes[0].section_name, "History Quiz");
    }

    #[tokio::test]
    async fn huge_counts_saturate_instead_of_overflowing() {
        let stats = StatsService::new(None);
        let big = completed("Marathon Quiz", 3_000_000_000, 3_000_000_000);
        stats.record(big.clone()).await.unwrap();
        let s = stats.record(big).await.unwrap();

        assert_eq!(s.total_questions_answered, u32::MAX);
        assert_eq!(s.total_quizzes_completed, 2);
        assert_eq!(s.total_points, 2 * 3_000_000_000 * POINTS_PER_CORRECT_ANSWER);
    }

    #[tokio::test]
    async fn progress_events_do_not_count() {
        let stats = StatsService::new(None);
        let mut progress = completed("Algebra Quiz", 1, 5);
        progress.is_completed = false;
        let s = stats.record(progress).await.unwrap();
        assert_eq!(s, StatsSummary::default());
    }

    #[tokio::test]
    async fn recent_window_is_capped() {
        let stats = StatsService::new(None);
        for i in 0..15 {
            stats.record(completed(&format!("Quiz {i}"), 1, 1)).await.unwrap();
        }
        let s = stats.summary().await;
        assert_eq!(s.recent_quizzes.len(), RECENT_QUIZ_LIMIT);
        assert_eq!(s.recent_quizzes[0].section_name, "Quiz 14");
        assert_eq!(s.total_quizzes_completed, 15);
    }

    #[tokio::test]
    async fn persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let stats = StatsService::new(Some(path.clone()));
        stats.record(completed("Biology Quiz", 3, 4)).await.unwrap();

        let reloaded = StatsService::new(Some(path));
        reloaded.load().await;
        let s = reloaded.summary().await;
        assert_eq!(s.total_quizzes_completed, 1);
        assert_eq!(s.last_quiz_result, "Biology Quiz");
    }

    #[tokio::test]
    async fn corrupt_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        std::fs::write(&path, "{not json").unwrap();

        let stats = StatsService::new(Some(path));
        stats.load().await;
        assert_eq!(stats.summary().await, StatsSummary::default());
    }

    #[tokio::test]
    async fn listener_consumes_bus_events() {
        let bus = QuizEventBus::new();
        let stats = StatsService::new(None);
        let handle = stats.spawn_listener(&bus);

        bus.publish(completed("Chemistry Quiz", 2, 2));
        drop(bus);
        handle.await.unwrap();

        assert_eq!(stats.summary().await.last_quiz_result, "Chemistry Quiz");
    }
}
