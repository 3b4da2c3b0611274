//! Infrastructure wiring: directories, log store, broadcast bus, and the
//! bridge that fans committed attendance notices out to SSE observers.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use tokio::sync::broadcast;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

use rollcall_attendance::{
    AttendanceNotice, AttendanceQuery, AttendanceService, InMemoryLogStore,
};
use rollcall_auth::{Hs256TokenCodec, InMemoryCredentialStore};
use rollcall_directory::{InMemoryGroupDirectory, InMemoryMemberDirectory};
use rollcall_events::{EventBus, InMemoryEventBus};

type Members = Arc<InMemoryMemberDirectory>;
type Store = Arc<InMemoryLogStore>;
type Bus = Arc<InMemoryEventBus<AttendanceNotice>>;

/// Everything the handlers need, shared via `Extension<Arc<AppServices>>`.
pub struct AppServices {
    pub members: Members,
    pub groups: Arc<InMemoryGroupDirectory>,
    pub log_store: Store,
    pub attendance: AttendanceService<Members, Store, Bus>,
    pub query: AttendanceQuery<Store, Members>,
    pub credentials: Arc<InMemoryCredentialStore>,
    pub tokens: Arc<Hs256TokenCodec>,
    realtime_tx: broadcast::Sender<AttendanceNotice>,
}

/// In-memory wiring (dev/test): directories + log store + bus + SSE bridge.
pub fn build_services(tokens: Arc<Hs256TokenCodec>) -> AppServices {
    let members: Members = Arc::new(InMemoryMemberDirectory::new());
    let groups = Arc::new(InMemoryGroupDirectory::new());
    let log_store: Store = Arc::new(InMemoryLogStore::new());
    let bus: Bus = Arc::new(InMemoryEventBus::new());

    // Realtime channel (SSE): lossy broadcast, decoupled from the scan path.
    let (realtime_tx, _realtime_rx) = broadcast::channel::<AttendanceNotice>(256);

    // Background subscriber: bus -> connected SSE observers.
    {
        let sub = bus.subscribe();
        let realtime_tx = realtime_tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match sub.recv() {
                // Lossy forward; no backpressure on the scan path.
                Ok(notice) => {
                    let _ = realtime_tx.send(notice);
                }
                Err(_) => break,
            }
        });
    }

    let attendance = AttendanceService::new(members.clone(), log_store.clone(), bus);
    let query = AttendanceQuery::new(log_store.clone(), members.clone());

    AppServices {
        members,
        groups,
        log_store,
        attendance,
        query,
        credentials: Arc::new(InMemoryCredentialStore::new()),
        tokens,
        realtime_tx,
    }
}

/// SSE stream of live attendance notices for one observer.
///
/// Event name carries the topic (`attendanceUpdated` / `dismissalNotification`),
/// data carries `{member, status, timestamp}`.
pub fn attendance_sse_stream(
    services: Arc<AppServices>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = services.realtime_tx.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(notice) => {
            let data = serde_json::to_string(&notice).unwrap_or_else(|_| "{}".to_string());
            Some(Ok(SseEvent::default().event(notice.topic).data(data)))
        }
        // Lagged observer: skip what it missed, keep the stream alive.
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
