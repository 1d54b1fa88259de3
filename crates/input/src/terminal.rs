//! Deadline-bounded keyboard polling on a real terminal.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use tui_blocks_engine::InputSource;

use crate::map::map_key;
use crate::types::{GameAction, POLL_SLICE_MS};

/// Keyboard input from the controlling terminal.
///
/// The terminal must already be in raw mode (the renderer takes care of that).
#[derive(Debug, Clone)]
pub struct TerminalInput {
    slice: Duration,
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            slice: Duration::from_millis(POLL_SLICE_MS as u64),
        }
    }

    /// First key press within `budget`, whatever the key.
    pub fn next_key(&mut self, budget: Duration) -> Result<Option<KeyEvent>> {
        poll_until(budget, self.slice, read_event, Some)
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, budget: Duration) -> Result<Option<GameAction>> {
        poll_until(budget, self.slice, read_event, map_key)
    }
}

fn read_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Poll in slices of at most `slice` until `accept` yields a value or `budget` is spent.
///
/// Only key presses are offered to `accept`; releases, repeats, mouse and
/// resize events are dropped.
pub fn poll_until<T>(
    budget: Duration,
    slice: Duration,
    mut next_event: impl FnMut(Duration) -> Result<Option<Event>>,
    mut accept: impl FnMut(KeyEvent) -> Option<T>,
) -> Result<Option<T>> {
    let deadline = Instant::now() + budget;
    loop {
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        let wait = (deadline - now).min(slice);

        if let Some(Event::Key(key)) = next_event(wait)? {
            if key.kind == KeyEventKind::Press {
                if let Some(value) = accept(key) {
                    return Ok(Some(value));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        })
    }

    fn scripted(events: Vec<Event>) -> impl FnMut(Duration) -> Result<Option<Event>> {
        let mut events: VecDeque<Event> = events.into();
        move |wait| match events.pop_front() {
            Some(ev) => Ok(Some(ev)),
            None => {
                std::thread::sleep(wait);
                Ok(None)
            }
        }
    }

    #[test]
    fn first_recognized_key_wins() {
        let events = vec![
            press(KeyCode::Char('x')),
            release(KeyCode::Left),
            press(KeyCode::Right),
            press(KeyCode::Left),
        ];
        let got = poll_until(
            Duration::from_secs(1),
            Duration::from_millis(1),
            scripted(events),
            map_key,
        )
        .unwrap();
        assert_eq!(got, Some(GameAction::MoveRight));
    }

    #[test]
    fn no_key_returns_none_after_budget() {
        let started = Instant::now();
        let got = poll_until(
            Duration::from_millis(30),
            Duration::from_millis(5),
            scripted(vec![press(KeyCode::Char('x'))]),
            map_key,
        )
        .unwrap();
        assert_eq!(got, None);
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn zero_budget_does_not_poll() {
        let mut calls = 0;
        let got = poll_until(
            Duration::ZERO,
            Duration::from_millis(5),
            |_| {
                calls += 1;
                Ok(None)
            },
            map_key,
        )
        .unwrap();
        assert_eq!(got, None);
        assert_eq!(calls, 0);
    }

    #[test]
    fn errors_propagate() {
        let got: Result<Option<GameAction>> = poll_until(
            Duration::from_secs(1),
            Duration::from_millis(5),
            |_| Err(anyhow::anyhow!("tty closed")),
            map_key,
        );
        assert!(got.is_err());
    }
}
