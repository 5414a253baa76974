//! Interactive dashboard state and key handling.
//!
//! `App` is handed its `TaskStore` at construction and passes it on to the
//! form and row editors as `&mut dyn TaskActions`. It learns about changes
//! through a store subscription rather than by inspecting the store.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use taskmaster_core::{Stats, Task, TaskActions, TaskId, TaskList, TaskStore};

use crate::config::UiSection;
use crate::tui::form::TaskForm;
use crate::tui::progress::ProgressAnimation;
use crate::tui::row::RowEditor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    store: TaskStore,
    changed: Rc<Cell<bool>>,
    form: TaskForm,
    editors: HashMap<TaskId, RowEditor>,
    focus: Focus,
    selected: usize,
    progress: ProgressAnimation,
    tick: Duration,
}

impl App {
    pub fn new(mut store: TaskStore, ui: &UiSection, now: Instant) -> Self {
        let changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&changed);
        store.subscribe(move |_| flag.set(true));

        let stats = Stats::compute(store.snapshot().tasks());
        Self {
            store,
            changed,
            form: TaskForm::new(),
            editors: HashMap::new(),
            focus: Focus::Form,
            selected: 0,
            progress: ProgressAnimation::new(
                stats.percentage,
                now,
                ui.progress_delay(),
                ui.progress_duration(),
            ),
            tick: ui.tick(),
        }
    }

    pub fn snapshot(&self) -> Arc<TaskList> {
        self.store.snapshot()
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(self.store.snapshot().tasks())
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    pub fn editor(&self, id: TaskId) -> Option<&RowEditor> {
        self.editors.get(&id)
    }

    pub fn progress_value(&self, now: Instant) -> f64 {
        self.progress.value_at(now)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.progress.is_running(now)
    }

    /// Pick up store changes: retarget the bar, drop editors of deleted
    /// rows, keep the selection in range. Returns whether anything changed.
    pub fn sync(&mut self, now: Instant) -> bool {
        if !self.changed.replace(false) {
            return false;
        }
        let snapshot = self.store.snapshot();
        let stats = Stats::compute(snapshot.tasks());
        self.progress.set_target(stats.percentage, now);
        self.editors
            .retain(|id, editor| editor.is_editing() && snapshot.contains(*id));
        self.selected = self.selected.min(snapshot.len().saturating_sub(1));
        true
    }

    fn selected_task(&self) -> Option<Task> {
        self.store.snapshot().tasks().get(self.selected).cloned()
    }

    fn editing_task(&self) -> Option<Task> {
        let task = self.selected_task()?;
        self.editors
            .get(&task.id)
            .is_some_and(RowEditor::is_editing)
            .then_some(task)
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        let control = if let Some(task) = self.editing_task() {
            self.handle_edit_key(&task, key.code);
            Control::Continue
        } else {
            match self.focus {
                Focus::Form => self.handle_form_key(key.code),
                Focus::List => self.handle_list_key(key.code),
            }
        };

        self.sync(now);
        control
    }

    fn handle_edit_key(&mut self, task: &Task, code: KeyCode) {
        let editor = self.editors.entry(task.id).or_default();
        match code {
            KeyCode::Enter => {
                editor.confirm(task, &mut self.store);
            }
            KeyCode::Esc => editor.cancel(),
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Char(c) => editor.push(c),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) -> Control {
        match code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Enter => {
                if self.form.submit(&mut self.store).is_some() {
                    self.selected = 0;
                }
            }
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Tab | KeyCode::Down => self.focus = Focus::List,
            KeyCode::Char(c) => self.form.push(c),
            _ => {}
        }
        Control::Continue
    }

    fn handle_list_key(&mut self, code: KeyCode) -> Control {
        let len = self.store.snapshot().len();
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
            KeyCode::Tab | KeyCode::Char('a') | KeyCode::Char('i') => self.focus = Focus::Form,
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected == 0 {
                    self.focus = Focus::Form;
                } else {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(task) = self.selected_task() {
                    self.store.toggle_complete(task.id);
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(task) = self.selected_task() {
                    self.editors
                        .entry(task.id)
                        .or_default()
                        .press_edit(&task, &mut self.store);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(task) = self.selected_task() {
                    self.editors.remove(&task.id);
                    self.store.delete(task.id);
                }
            }
            _ => {}
        }
        Control::Continue
    }
}
