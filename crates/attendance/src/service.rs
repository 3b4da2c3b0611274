//! Turns a raw scan signal into a durable log entry and a broadcast notice.

use chrono::Utc;

use rollcall_directory::MemberDirectory;
use rollcall_events::EventBus;

use crate::entry::{AttendanceLogEntry, AttendanceStatus};
use crate::error::AttendanceError;
use crate::notice::AttendanceNotice;
use crate::store::LogStore;

/// The write side of the attendance pipeline.
///
/// Owns no state of its own; all shared state lives in the directory, the
/// log store and the bus, so one service value can be shared across
/// concurrent requests.
pub struct AttendanceService<D, S, B> {
    directory: D,
    store: S,
    bus: B,
}

impl<D, S, B> AttendanceService<D, S, B>
where
    D: MemberDirectory,
    S: LogStore,
    B: EventBus<AttendanceNotice>,
{
    pub fn new(directory: D, store: S, bus: B) -> Self {
        Self {
            directory,
            store,
            bus,
        }
    }

    /// Record one scan signal.
    ///
    /// On success the entry is durably appended **before** the notice is
    /// published: the broadcast always describes committed state. A publish
    /// failure is logged and swallowed; the append is the authoritative
    /// outcome.
    ///
    /// Repeated scans of the same card are not deduplicated; each call
    /// appends its own entry and publishes its own notice.
    pub fn record_scan(
        &self,
        card_number: &str,
        kind: AttendanceStatus,
    ) -> Result<AttendanceLogEntry, AttendanceError> {
        if card_number.trim().is_empty() {
            return Err(AttendanceError::Validation(
                "card number must not be empty".to_string(),
            ));
        }

        let member = self
            .directory
            .find_by_card_number(card_number)?
            .ok_or(AttendanceError::MemberNotFound)?;

        let entry = self.store.append(member.id, kind, Utc::now())?;

        let notice = AttendanceNotice::new(member.full_name, kind, entry.timestamp);
        if let Err(e) = self.bus.publish(notice) {
            tracing::warn!(card_number, "broadcast publish failed: {e:?}");
        }

        tracing::info!(
            member_id = %entry.member_id,
            status = %entry.status,
            "attendance recorded"
        );

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rollcall_directory::{InMemoryMemberDirectory, Member};
    use rollcall_events::{InMemoryEventBus, Subscription};

    use crate::notice::{ATTENDANCE_UPDATED, DISMISSAL_NOTIFICATION};
    use crate::store::{InMemoryLogStore, StoreError};

    type TestService =
        AttendanceService<Arc<InMemoryMemberDirectory>, Arc<InMemoryLogStore>, Arc<InMemoryEventBus<AttendanceNotice>>>;

    struct Fixture {
        directory: Arc<InMemoryMemberDirectory>,
        store: Arc<InMemoryLogStore>,
        bus: Arc<InMemoryEventBus<AttendanceNotice>>,
        service: TestService,
    }

    fn fixture() -> Fixture {
        let directory = Arc::new(InMemoryMemberDirectory::new());
        let store = Arc::new(InMemoryLogStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let service = AttendanceService::new(directory.clone(), store.clone(), bus.clone());
        Fixture {
            directory,
            store,
            bus,
            service,
        }
    }

    fn observe(f: &Fixture) -> Subscription<AttendanceNotice> {
        f.bus.subscribe()
    }

    #[test]
    fn successful_scan_appends_and_broadcasts() {
        let f = fixture();
        let jane = f.directory.insert(Member::new("Jane Doe", "C-1001")).unwrap();
        let sub = observe(&f);

        let before = Utc::now();
        let entry = f
            .service
            .record_scan("C-1001", AttendanceStatus::Present)
            .unwrap();

        assert_eq!(entry.member_id, jane.id);
        assert_eq!(entry.status, AttendanceStatus::Present);
        assert!(entry.timestamp >= before);
        assert_eq!(f.store.len(), 1);

        let notice = sub.try_recv().unwrap();
        assert_eq!(notice.topic, ATTENDANCE_UPDATED);
        assert_eq!(notice.member, "Jane Doe");
        assert_eq!(notice.status, AttendanceStatus::Present);
        assert_eq!(notice.timestamp, entry.timestamp);
    }

    #[test]
    fn dismissal_scan_uses_its_own_topic() {
        let f = fixture();
        f.directory.insert(Member::new("Jane Doe", "C-1001")).unwrap();
        let sub = observe(&f);

        f.service
            .record_scan("C-1001", AttendanceStatus::Dismissed)
            .unwrap();

        assert_eq!(sub.try_recv().unwrap().topic, DISMISSAL_NOTIFICATION);
    }

    #[test]
    fn unknown_card_fails_without_side_effects() {
        let f = fixture();
        f.directory.insert(Member::new("Jane Doe", "C-1001")).unwrap();
        let sub = observe(&f);

        let err = f
            .service
            .record_scan("C-9999", AttendanceStatus::Present)
            .unwrap_err();

        assert_eq!(err, AttendanceError::MemberNotFound);
        assert_eq!(f.store.len(), 0);
        assert!(sub.try_recv().is_err());
    }

    #[test]
    fn empty_card_number_is_rejected_before_lookup() {
        let f = fixture();
        let err = f
            .service
            .record_scan("  ", AttendanceStatus::Present)
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Validation(_)));
        assert_eq!(f.store.len(), 0);
    }

    #[test]
    fn repeated_scans_produce_distinct_entries() {
        let f = fixture();
        f.directory.insert(Member::new("Jane Doe", "C-1001")).unwrap();

        let first = f
            .service
            .record_scan("C-1001", AttendanceStatus::Present)
            .unwrap();
        let second = f
            .service
            .record_scan("C-1001", AttendanceStatus::Present)
            .unwrap();

        // No deduplication: this is expected behavior, not a bug.
        assert_ne!(first.id, second.id);
        assert_eq!(f.store.len(), 2);
    }

    #[test]
    fn concurrent_scans_for_different_cards_each_append_once() {
        let f = fixture();
        f.directory.insert(Member::new("Anna Smith", "C-1")).unwrap();
        f.directory.insert(Member::new("Hannah Lee", "C-2")).unwrap();

        let service = Arc::new(f.service);
        let a = {
            let service = service.clone();
            std::thread::spawn(move || service.record_scan("C-1", AttendanceStatus::Present))
        };
        let b = {
            let service = service.clone();
            std::thread::spawn(move || service.record_scan("C-2", AttendanceStatus::Present))
        };

        let entry_a = a.join().unwrap().unwrap();
        let entry_b = b.join().unwrap().unwrap();

        assert_ne!(entry_a.id, entry_b.id);
        assert_eq!(f.store.len(), 2);
    }

    /// Bus double that records how many entries the store held at publish
    /// time, so the write-before-publish ordering is observable.
    struct OrderProbeBus {
        store: Arc<InMemoryLogStore>,
        seen_at_publish: AtomicUsize,
    }

    impl EventBus<AttendanceNotice> for OrderProbeBus {
        type Error = StoreError;

        fn publish(&self, _message: AttendanceNotice) -> Result<(), Self::Error> {
            self.seen_at_publish.store(self.store.len(), Ordering::SeqCst);
            Ok(())
        }

        fn subscribe(&self) -> Subscription<AttendanceNotice> {
            let (_tx, rx) = std::sync::mpsc::channel();
            Subscription::new(rx)
        }
    }

    #[test]
    fn store_write_strictly_precedes_publish() {
        let directory = Arc::new(InMemoryMemberDirectory::new());
        directory.insert(Member::new("Jane Doe", "C-1001")).unwrap();
        let store = Arc::new(InMemoryLogStore::new());
        let bus = Arc::new(OrderProbeBus {
            store: store.clone(),
            seen_at_publish: AtomicUsize::new(0),
        });

        let service = AttendanceService::new(directory, store, bus.clone());
        service.record_scan("C-1001", AttendanceStatus::Present).unwrap();

        assert_eq!(bus.seen_at_publish.load(Ordering::SeqCst), 1);
    }

    /// Bus double that always fails to publish.
    struct FailingBus;

    impl EventBus<AttendanceNotice> for FailingBus {
        type Error = &'static str;

        fn publish(&self, _message: AttendanceNotice) -> Result<(), Self::Error> {
            Err("bus down")
        }

        fn subscribe(&self) -> Subscription<AttendanceNotice> {
            let (_tx, rx) = std::sync::mpsc::channel();
            Subscription::new(rx)
        }
    }

    #[test]
    fn broadcast_failure_is_swallowed_and_entry_still_returned() {
        let directory = Arc::new(InMemoryMemberDirectory::new());
        directory.insert(Member::new("Jane Doe", "C-1001")).unwrap();
        let store = Arc::new(InMemoryLogStore::new());

        let service = AttendanceService::new(directory, store.clone(), FailingBus);
        let entry = service.record_scan("C-1001", AttendanceStatus::Present).unwrap();

        assert_eq!(entry.status, AttendanceStatus::Present);
        assert_eq!(store.len(), 1);
    }
}
