//! Debounce на счётчике поколений
//!
//! Каждый ввод увеличивает поколение; отложенное действие выполняется, только
//! если за время задержки поколение не сменилось.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Чистый счётчик поколений
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    /// Новый ввод; возвращает его номер
    pub fn bump(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }

    /// Ввод `ticket` всё ещё последний
    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

#[derive(Clone, Copy)]
pub struct Debouncer {
    generation: StoredValue<Generation>,
    delay_ms: u32,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            generation: StoredValue::new(Generation::default()),
            delay_ms,
        }
    }

    /// Запланировать `action`; предыдущее незавершённое отменяется
    pub fn call(&self, action: impl FnOnce() + 'static) {
        let mut ticket = 0;
        self.generation.update_value(|g| ticket = g.bump());
        let generation = self.generation;
        let delay = self.delay_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            let current = generation
                .try_with_value(|g| g.is_current(ticket))
                .unwrap_or(false);
            if current {
                action();
            }
        });
    }

    /// Отменить запланированное действие
    pub fn cancel(&self) {
        self.generation.update_value(|g| {
            g.bump();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_generation_fires() {
        let mut generation = Generation::default();
        let first = generation.bump();
        let second = generation.bump();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_cancel_invalidates_pending() {
        let mut generation = Generation::default();
        let pending = generation.bump();
        generation.bump();
        assert!(!generation.is_current(pending));
    }
}
