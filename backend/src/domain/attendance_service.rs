use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::attendance_composer::AttendanceComposer;
use super::attendance_session::{AttendanceSession, ComposeTicket, SessionView};
use super::commands::attendance::SaveAttendanceResult;
use super::error::{DomainError, DomainResult};
use super::models::{snapshot_key, AttendanceSnapshot};
use super::validation::{clean_date, clean_section};

type SessionHandle = Arc<Mutex<AttendanceSession>>;

struct SessionEntry {
    handle: SessionHandle,
    last_touched: Instant,
}

impl SessionEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_touched.elapsed() > ttl
    }
}

/// Attendance sessions keyed by session id.
///
/// A session's mutex is only held while its state is read or changed, never
/// across a store call. Store work is described by tickets taken under the
/// lock and its outcome is applied under a fresh lock afterwards.
///
/// Sessions left untouched for longer than `session_ttl` are gone: looking
/// one up reports it as not found, and opening a session sweeps them all.
#[derive(Clone)]
pub struct AttendanceService {
    composer: AttendanceComposer,
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    session_ttl: Duration,
}

impl AttendanceService {
    pub fn new(composer: AttendanceComposer, session_ttl: Duration) -> Self {
        Self {
            composer,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            session_ttl,
        }
    }

    /// Number of sessions currently held, expired ones included until swept
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Open a session with freshly loaded teacher and section options
    pub async fn open_session(&self) -> DomainResult<SessionView> {
        let (teachers, sections) = tokio::try_join!(
            self.composer.load_teacher_options(),
            self.composer.load_section_options(),
        )?;

        let session_id = uuid::Uuid::new_v4().to_string();
        info!(
            "Opening attendance session {} ({} teachers, {} sections)",
            session_id,
            teachers.len(),
            sections.len()
        );

        let session = AttendanceSession::new(session_id.clone(), teachers, sections);
        let view = session.view();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(self.session_ttl));
        let swept = before - sessions.len();
        if swept > 0 {
            info!("Evicted {} idle attendance sessions", swept);
        }
        sessions.insert(
            session_id,
            SessionEntry {
                handle: Arc::new(Mutex::new(session)),
                last_touched: Instant::now(),
            },
        );

        Ok(view)
    }

    pub async fn get_session(&self, session_id: &str) -> DomainResult<SessionView> {
        let handle = self.handle(session_id).await?;
        let session = handle.lock().await;
        Ok(session.view())
    }

    pub async fn close_session(&self, session_id: &str) -> DomainResult<()> {
        match self.sessions.write().await.remove(session_id) {
            Some(_) => {
                info!("Closed attendance session {}", session_id);
                Ok(())
            }
            None => Err(DomainError::not_found("Attendance session", session_id)),
        }
    }

    pub async fn select_teacher(
        &self,
        session_id: &str,
        teacher_id: Option<&str>,
    ) -> DomainResult<SessionView> {
        let handle = self.handle(session_id).await?;
        let mut session = handle.lock().await;
        session.select_teacher(teacher_id)?;
        Ok(session.view())
    }

    pub async fn select_subject(
        &self,
        session_id: &str,
        subject: Option<&str>,
    ) -> DomainResult<SessionView> {
        let handle = self.handle(session_id).await?;
        let mut session = handle.lock().await;
        session.select_subject(subject)?;
        Ok(session.view())
    }

    /// Change the section and, when a date is also set, compose the roster
    pub async fn select_section(
        &self,
        session_id: &str,
        section: Option<&str>,
    ) -> DomainResult<SessionView> {
        let handle = self.handle(session_id).await?;
        let ticket = handle.lock().await.select_section(section)?;
        self.compose_into(&handle, ticket).await
    }

    /// Change the date and, when a section is also set, compose the roster
    pub async fn select_date(
        &self,
        session_id: &str,
        date: Option<&str>,
    ) -> DomainResult<SessionView> {
        let handle = self.handle(session_id).await?;
        let ticket = handle.lock().await.select_date(date)?;
        self.compose_into(&handle, ticket).await
    }

    pub async fn toggle_presence(
        &self,
        session_id: &str,
        student_id: &str,
    ) -> DomainResult<SessionView> {
        let handle = self.handle(session_id).await?;
        let mut session = handle.lock().await;

        match session.toggle(student_id) {
            Some(present) => {
                info!(
                    "Session {}: student {} marked {}",
                    session_id,
                    student_id,
                    if present { "present" } else { "absent" }
                );
                Ok(session.view())
            }
            None => Err(DomainError::not_found("Roster row", student_id)),
        }
    }

    /// Write the session's rows as the snapshot for its (date, section).
    /// Nothing is written when a selection is missing or the roster is empty;
    /// a failed write leaves the rows in place.
    pub async fn save(&self, session_id: &str) -> DomainResult<SaveAttendanceResult> {
        let handle = self.handle(session_id).await?;
        let ticket = handle.lock().await.prepare_save().map_err(|e| {
            warn!("Session {}: save refused: {}", session_id, e);
            e
        })?;

        let result = self.composer.save(ticket.snapshot).await?;

        if !handle.lock().await.mark_persisted(ticket.revision) {
            info!(
                "Session {}: rows changed while saving, left unpersisted",
                session_id
            );
        }

        Ok(result)
    }

    /// The stored snapshot for (date, section), outside any session
    pub async fn lookup_snapshot(
        &self,
        date: &str,
        section: &str,
    ) -> DomainResult<AttendanceSnapshot> {
        let date = clean_date(date)?;
        let section = clean_section(section)?;

        self.composer
            .snapshot(&date, &section)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("Attendance snapshot", snapshot_key(&date, &section))
            })
    }

    /// The live session for `session_id`, refreshing its idle timer. An
    /// expired session is dropped and reported as not found.
    async fn handle(&self, session_id: &str) -> DomainResult<SessionHandle> {
        let mut sessions = self.sessions.write().await;

        if let Some(entry) = sessions
            .get_mut(session_id)
            .filter(|entry| !entry.is_expired(self.session_ttl))
        {
            entry.last_touched = Instant::now();
            return Ok(entry.handle.clone());
        }

        if sessions.remove(session_id).is_some() {
            info!("Attendance session {} expired", session_id);
        }
        Err(DomainError::not_found("Attendance session", session_id))
    }

    async fn compose_into(
        &self,
        handle: &SessionHandle,
        ticket: Option<ComposeTicket>,
    ) -> DomainResult<SessionView> {
        let Some(ticket) = ticket else {
            return Ok(handle.lock().await.view());
        };

        let rows = self.composer.compose(&ticket).await?;

        let mut session = handle.lock().await;
        if !session.apply_compose(ticket.seq, rows) {
            info!(
                "Session {}: discarded stale roster for section {} on {}",
                session.id(),
                ticket.section,
                ticket.date
            );
        }
        Ok(session.view())
    }
}
