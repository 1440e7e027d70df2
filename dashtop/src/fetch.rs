//! Loading/error/data state shared by every widget, plus the tokens that keep
//! stale responses from overwriting newer state.

use crate::api::ApiResult;

#[derive(Debug, Clone)]
pub struct FetchState<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchState<T> {
    pub fn new() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Back to the initial state (used on remount).
    pub fn reset(&mut self) {
        self.data = None;
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.loading = false;
    }

    /// Keeps whatever data was there before.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    pub fn settle(&mut self, result: ApiResult<T>) {
        match result {
            Ok(v) => self.succeed(v),
            Err(e) => self.fail(e.to_string()),
        }
    }
}

/// Identifies one request: which mount issued it and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub seq: u64,
}

impl Ticket {
    pub fn new(generation: u64, seq: u64) -> Self {
        Self { generation, seq }
    }
}

#[derive(Debug)]
pub struct Fetched<T> {
    pub ticket: Ticket,
    pub result: ApiResult<T>,
}

/// Generation bumps on every mount and unmount; sequence numbers only count up
/// inside one generation. A result is applied only if it belongs to the live
/// generation and is newer than the last applied one.
#[derive(Debug, Default)]
pub struct RequestTokens {
    generation: u64,
    mounted: bool,
    next_seq: u64,
    applied_seq: u64,
}

impl RequestTokens {
    pub fn mount(&mut self) -> u64 {
        self.generation += 1;
        self.mounted = true;
        self.next_seq = 0;
        self.applied_seq = 0;
        self.generation
    }

    pub fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn issue(&mut self) -> Ticket {
        self.next_seq += 1;
        Ticket::new(self.generation, self.next_seq)
    }

    pub fn accept(&mut self, ticket: Ticket) -> bool {
        if !self.mounted || ticket.generation != self.generation || ticket.seq <= self.applied_seq
        {
            return false;
        }
        self.applied_seq = ticket.seq;
        true
    }
}
