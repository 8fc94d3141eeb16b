use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use folio_contact::{Controller, ControllerSettings, Delivery, ToastQueue};
use tokio::time::Instant;
use ulid::Ulid;

pub const SESSION_COOKIE: &str = "folio_session";

/// Returns the visitor's session id, issuing a new cookie when the request
/// carries none or a malformed one.
pub fn session_id(jar: CookieJar) -> (CookieJar, String) {
    if let Some(id) = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| Ulid::from_string(value).is_ok())
    {
        return (jar, id);
    }

    let id = Ulid::new().to_string();
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    (jar.add(cookie), id)
}

/// One visitor's contact controller and the toasts it raised.
#[derive(Clone)]
pub struct ContactSession {
    pub controller: Arc<Controller>,
    pub toasts: Arc<ToastQueue>,
    last_seen: Instant,
}

struct Inner {
    delivery: Arc<dyn Delivery>,
    settings: ControllerSettings,
    ttl: Duration,
    sessions: Mutex<HashMap<String, ContactSession>>,
}

/// Contact controllers keyed by session cookie.
///
/// Sessions idle for longer than `ttl` are dropped on the next access, which
/// tears their controller down and cancels any pending confirmation reset.
/// A session is never dropped while its submission is in flight.
#[derive(Clone)]
pub struct ContactSessions {
    inner: Arc<Inner>,
}

impl ContactSessions {
    pub fn new(delivery: Arc<dyn Delivery>, settings: ControllerSettings, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                delivery,
                settings,
                ttl,
                sessions: Mutex::new(HashMap::new()),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ContactSession>> {
        self.inner
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_or_create(&self, id: &str) -> ContactSession {
        let now = Instant::now();
        let mut sessions = self.lock();
        self.evict_expired(&mut sessions, now);

        let session = sessions.entry(id.to_owned()).or_insert_with(|| {
            tracing::debug!(session = id, "Contact session created");

            let toasts = Arc::new(ToastQueue::new());
            let controller = Controller::new(
                self.inner.delivery.clone(),
                toasts.clone(),
                self.inner.settings.clone(),
            );

            ContactSession {
                controller: Arc::new(controller),
                toasts,
                last_seen: now,
            }
        });

        session.last_seen = now;
        session.clone()
    }

    pub fn get(&self, id: &str) -> Option<ContactSession> {
        let now = Instant::now();
        let mut sessions = self.lock();
        self.evict_expired(&mut sessions, now);

        let session = sessions.get_mut(id)?;
        session.last_seen = now;

        Some(session.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict_expired(&self, sessions: &mut HashMap<String, ContactSession>, now: Instant) {
        let ttl = self.inner.ttl;
        let before = sessions.len();

        sessions.retain(|_, session| {
            now.duration_since(session.last_seen) < ttl || session.controller.is_submitting()
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Expired contact sessions dropped");
        }
    }
}
