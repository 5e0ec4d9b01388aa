//! Shared fakes for session-level tests: a recording transport and a
//! recording scheduler. Neither does anything asynchronous; tests fire
//! timer events by hand.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use wordle_battle::adapter::{Scheduler, TimerEvent, TimerHandle, Transport};
use wordle_battle::types::{ChatId, GroupId};

#[derive(Debug, Clone)]
pub struct Scheduled {
    pub handle: TimerHandle,
    pub interval: Duration,
    pub first: Option<Duration>,
    pub repeating: bool,
    pub event: TimerEvent,
}

#[derive(Default)]
pub struct FakeScheduler {
    next: AtomicU64,
    pub scheduled: Mutex<Vec<Scheduled>>,
    pub cancelled: Mutex<Vec<TimerHandle>>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &self,
        interval: Duration,
        first: Option<Duration>,
        repeating: bool,
        event: TimerEvent,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next.fetch_add(1, Ordering::Relaxed));
        self.scheduled.lock().unwrap().push(Scheduled {
            handle,
            interval,
            first,
            repeating,
            event,
        });
        handle
    }

    /// Handles scheduled but not (yet) cancelled.
    pub fn pending(&self) -> Vec<Scheduled> {
        let cancelled = self.cancelled.lock().unwrap();
        self.scheduled
            .lock()
            .unwrap()
            .iter()
            .filter(|s| !cancelled.contains(&s.handle))
            .cloned()
            .collect()
    }

    pub fn cancel_count(&self, handle: TimerHandle) -> usize {
        self.cancelled
            .lock()
            .unwrap()
            .iter()
            .filter(|&&h| h == handle)
            .count()
    }
}

impl Scheduler for FakeScheduler {
    fn schedule_once(&self, delay: Duration, event: TimerEvent) -> TimerHandle {
        self.push(delay, None, false, event)
    }

    fn schedule_repeating(
        &self,
        interval: Duration,
        first: Option<Duration>,
        event: TimerEvent,
    ) -> TimerHandle {
        self.push(interval, first, true, event)
    }

    fn cancel(&self, handle: TimerHandle) {
        self.cancelled.lock().unwrap().push(handle);
    }
}

#[derive(Default)]
pub struct FakeTransport {
    pub messages: Mutex<Vec<(ChatId, String)>>,
    pub members: Mutex<Vec<(GroupId, ChatId)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&self, group: GroupId, chat: ChatId) {
        self.members.lock().unwrap().push((group, chat));
    }

    pub fn sent_to(&self, chat: ChatId) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == chat)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn total_sent(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl Transport for FakeTransport {
    fn send_message(&self, chat: ChatId, text: &str) {
        self.messages.lock().unwrap().push((chat, text.to_string()));
    }

    fn is_member(&self, group: GroupId, chat: ChatId) -> bool {
        self.members.lock().unwrap().contains(&(group, chat))
    }
}

/// A pool of real words large enough for multi-player timer scenarios.
pub const ANSWERS: &[&str] = &[
    "CRANE", "SLATE", "RAISE", "MOUNT", "SPLIT", "ERASE", "SPEED", "GRAPE", "HOUSE", "PLANT",
    "STONE", "CHAIR", "BREAD", "CLOUD", "TIGER", "WHALE", "QUEEN", "FROST", "BLAZE", "CANDY",
    "DRIFT", "EAGLE", "FLAME", "GHOST", "HONEY", "IVORY", "JUICE", "KNIFE", "LEMON", "MEDAL",
];

/// Valid guesses guaranteed to miss every answer above.
pub const MISSES: &[&str] = &[
    "ABBEY", "BANJO", "CACHE", "DODGE", "EPOCH", "FJORD", "GECKO", "HYENA", "IGLOO", "JETTY",
    "KAYAK", "LLAMA", "MYRRH", "NYMPH", "OXIDE", "PYLON", "QUILT", "RHINO", "SYRUP", "TULIP",
];
