use crate::session::Session;
use crate::tui::action::Action;
use ratatui::widgets::ListState;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Screen {
    Launch,
    Home,
    /// Index into the session's shopping lists.
    ListDetail(usize),
    Settings,
}

/// What the input line writes to when submitted.
#[derive(Debug, PartialEq, Clone)]
pub enum EditTarget {
    ListName(usize),
    CategoryName(usize),
    ItemName(String),
    ItemPrice(String),
    TaxRate,
}

#[derive(Debug, PartialEq, Clone)]
pub enum InputMode {
    Normal,
    Editing(EditTarget),
}

pub struct AppState {
    pub session: Session,
    pub screen: Screen,
    pub list_state: ListState,
    pub item_state: ListState,
    pub cat_state: ListState,
    pub mode: InputMode,
    pub input_buffer: String,
    pub cursor_position: usize,
    pub message: String,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        let mut l_state = ListState::default();
        l_state.select(Some(0));
        let mut i_state = ListState::default();
        i_state.select(Some(0));
        let mut c_state = ListState::default();
        c_state.select(Some(0));
        Self {
            session,
            screen: Screen::Launch,
            list_state: l_state,
            item_state: i_state,
            cat_state: c_state,
            mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            message: "Enter: Start | q: Quit".to_string(),
        }
    }

    /// Applies one action. Returns `true` when the app should exit.
    pub fn apply(&mut self, action: Action) -> bool {
        if action == Action::Quit {
            return true;
        }
        if let InputMode::Editing(target) = self.mode.clone() {
            self.apply_input(target, action);
            return false;
        }

        match self.screen {
            Screen::Launch => {
                if action == Action::Open {
                    self.screen = Screen::Home;
                    self.message = format!("Lists: {}", self.session.shopping_lists.len());
                }
            }
            Screen::Home => self.apply_home(action),
            Screen::ListDetail(_) => self.apply_detail(action),
            Screen::Settings => self.apply_settings(action),
        }
        false
    }

    fn apply_home(&mut self, action: Action) {
        let len = self.session.shopping_lists.len();
        match action {
            Action::Next => step(&mut self.list_state, len, true),
            Action::Previous => step(&mut self.list_state, len, false),
            Action::JumpForward(n) => jump(&mut self.list_state, len, n as isize),
            Action::JumpBackward(n) => jump(&mut self.list_state, len, -(n as isize)),
            Action::Open => {
                if let Some(idx) = selected(&self.list_state, len) {
                    self.screen = Screen::ListDetail(idx);
                    self.item_state.select(Some(0));
                    self.message = self.session.total_label();
                }
            }
            Action::Add => {
                let idx = self.session.add_list();
                self.list_state.select(Some(idx));
                self.message = "List added.".to_string();
            }
            Action::Rename => {
                if let Some(idx) = selected(&self.list_state, len) {
                    let current = self.session.shopping_lists[idx].clone();
                    self.begin_input(EditTarget::ListName(idx), &current);
                }
            }
            Action::Delete => {
                if let Some(idx) = selected(&self.list_state, len) {
                    self.session.remove_list(idx);
                    clamp(&mut self.list_state, self.session.shopping_lists.len());
                    self.message = "List deleted.".to_string();
                }
            }
            Action::OpenSettings => {
                self.screen = Screen::Settings;
                self.cat_state.select(Some(0));
                self.message = format!("Categories: {}", self.session.categories.len());
            }
            Action::Back => self.screen = Screen::Launch,
            _ => {}
        }
    }

    fn apply_detail(&mut self, action: Action) {
        let len = self.session.items.len();
        match action {
            Action::Next => step(&mut self.item_state, len, true),
            Action::Previous => step(&mut self.item_state, len, false),
            Action::JumpForward(n) => jump(&mut self.item_state, len, n as isize),
            Action::JumpBackward(n) => jump(&mut self.item_state, len, -(n as isize)),
            Action::Add => {
                self.session.add_item();
                self.item_state.select(Some(self.session.items.len() - 1));
                self.message = "Item added. n: Name | p: Price".to_string();
            }
            Action::EditName => {
                if let Some((id, name)) = self.selected_item(|i| i.name.clone()) {
                    self.begin_input(EditTarget::ItemName(id), &name);
                }
            }
            Action::EditPrice => {
                if let Some((id, price)) = self.selected_item(|i| i.price.clone()) {
                    self.begin_input(EditTarget::ItemPrice(id), &price);
                }
            }
            Action::CycleCategory => {
                if let Some((id, _)) = self.selected_item(|_| ()) {
                    self.session.cycle_item_category(&id);
                }
            }
            Action::Delete => {
                if let Some((id, _)) = self.selected_item(|_| ()) {
                    self.session.remove_item(&id);
                    clamp(&mut self.item_state, self.session.items.len());
                    self.message = self.session.total_label();
                }
            }
            Action::EditTax => {
                let rate = self.session.tax_rate.clone();
                self.begin_input(EditTarget::TaxRate, &rate);
            }
            Action::Back => {
                self.screen = Screen::Home;
                self.message = format!("Lists: {}", self.session.shopping_lists.len());
            }
            _ => {}
        }
    }

    fn apply_settings(&mut self, action: Action) {
        let len = self.session.categories.len();
        match action {
            Action::Next => step(&mut self.cat_state, len, true),
            Action::Previous => step(&mut self.cat_state, len, false),
            Action::JumpForward(n) => jump(&mut self.cat_state, len, n as isize),
            Action::JumpBackward(n) => jump(&mut self.cat_state, len, -(n as isize)),
            Action::Add => {
                let idx = self.session.add_category();
                self.cat_state.select(Some(idx));
                self.message = "Category added.".to_string();
            }
            Action::Rename => {
                if let Some(idx) = selected(&self.cat_state, len) {
                    let current = self.session.categories[idx].clone();
                    self.begin_input(EditTarget::CategoryName(idx), &current);
                }
            }
            Action::Delete => {
                if let Some(idx) = selected(&self.cat_state, len) {
                    self.session.remove_category(idx);
                    clamp(&mut self.cat_state, self.session.categories.len());
                    self.message = "Category deleted.".to_string();
                }
            }
            Action::Back => {
                self.screen = Screen::Home;
                self.message = format!("Lists: {}", self.session.shopping_lists.len());
            }
            _ => {}
        }
    }

    fn apply_input(&mut self, target: EditTarget, action: Action) {
        match action {
            Action::InsertChar(c) => self.enter_char(c),
            Action::DeleteChar => self.delete_char(),
            Action::CursorLeft => self.move_cursor_left(),
            Action::CursorRight => self.move_cursor_right(),
            Action::Cancel => {
                self.mode = InputMode::Normal;
                self.reset_input();
                self.message = "Cancelled.".to_string();
            }
            Action::Submit => {
                let value = self.input_buffer.clone();
                match target {
                    EditTarget::ListName(idx) => {
                        self.session.rename_list(idx, &value);
                    }
                    EditTarget::CategoryName(idx) => {
                        self.session.rename_category(idx, &value);
                    }
                    EditTarget::ItemName(id) => {
                        self.session.set_item_name(&id, &value);
                    }
                    EditTarget::ItemPrice(id) => {
                        self.session.set_item_price(&id, &value);
                    }
                    EditTarget::TaxRate => self.session.set_tax_rate(&value),
                }
                self.mode = InputMode::Normal;
                self.reset_input();
                self.message = match self.screen {
                    Screen::ListDetail(_) => self.session.total_label(),
                    _ => "Saved on exit.".to_string(),
                };
            }
            _ => {}
        }
    }

    fn begin_input(&mut self, target: EditTarget, current: &str) {
        self.mode = InputMode::Editing(target);
        self.input_buffer = current.to_string();
        self.cursor_position = self.input_buffer.chars().count();
    }

    fn selected_item<T>(&self, f: impl FnOnce(&crate::model::Item) -> T) -> Option<(String, T)> {
        let idx = selected(&self.item_state, self.session.items.len())?;
        let item = &self.session.items[idx];
        Some((item.id().to_string(), f(item)))
    }

    /// Name shown in the detail screen title.
    pub fn current_list_name(&self) -> &str {
        match self.screen {
            Screen::ListDetail(idx) => self
                .session
                .shopping_lists
                .get(idx)
                .map(String::as_str)
                .unwrap_or(""),
            _ => "",
        }
    }

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        let byte_index = self.byte_index();
        self.input_buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let from_left_to_current_index = current_index - 1;
            let before_char_to_delete = self.input_buffer.chars().take(from_left_to_current_index);
            let after_char_to_delete = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before_char_to_delete.chain(after_char_to_delete).collect();
            self.move_cursor_left();
        }
    }
    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }
    fn byte_index(&self) -> usize {
        self.input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len())
    }
}

fn selected(state: &ListState, len: usize) -> Option<usize> {
    state.selected().filter(|&i| i < len)
}

// Wraps around at either end.
fn step(state: &mut ListState, len: usize, forward: bool) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) if forward => {
            if i >= len - 1 {
                0
            } else {
                i + 1
            }
        }
        Some(i) => {
            if i == 0 {
                len - 1
            } else {
                i - 1
            }
        }
        None => 0,
    };
    state.select(Some(i));
}

// Clamps instead of wrapping.
fn jump(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        return;
    }
    let current = state.selected().unwrap_or(0);
    let new_index = current.saturating_add_signed(delta).min(len - 1);
    state.select(Some(new_index));
}

fn clamp(state: &mut ListState, len: usize) {
    let sel = state.selected().unwrap_or(0);
    if len == 0 {
        state.select(Some(0));
    } else if sel >= len {
        state.select(Some(len - 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn app() -> AppState {
        AppState::new(Session::new(&Config::default()))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.apply(Action::InsertChar(c));
        }
    }

    #[test]
    fn launch_opens_home_and_quit_exits() {
        let mut state = app();
        assert!(!state.apply(Action::Open));
        assert_eq!(state.screen, Screen::Home);
        assert!(state.apply(Action::Quit));
    }

    #[test]
    fn add_and_price_item_updates_total() {
        let mut state = app();
        state.apply(Action::Open);
        state.apply(Action::Open);
        assert_eq!(state.screen, Screen::ListDetail(0));
        assert_eq!(state.current_list_name(), "Groceries");

        state.apply(Action::Add);
        state.apply(Action::EditName);
        type_text(&mut state, "Milk");
        state.apply(Action::Submit);
        state.apply(Action::EditPrice);
        type_text(&mut state, "3.50");
        state.apply(Action::Submit);

        let item = &state.session.items[0];
        assert_eq!(item.name, "Milk");
        assert_eq!(item.price, "3.50");
        assert_eq!(item.category, "Food");
        assert_eq!(state.message, "Total with Tax: $3.85");
    }

    #[test]
    fn cancel_leaves_value_untouched() {
        let mut state = app();
        state.apply(Action::Open);
        state.apply(Action::Rename);
        assert_eq!(state.input_buffer, "Groceries");
        type_text(&mut state, "!!");
        state.apply(Action::Cancel);
        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.session.shopping_lists[0], "Groceries");
    }

    #[test]
    fn tax_rate_edit_is_session_only() {
        let mut state = app();
        state.apply(Action::Open);
        state.apply(Action::Open);
        state.apply(Action::EditTax);
        state.apply(Action::DeleteChar);
        state.apply(Action::DeleteChar);
        type_text(&mut state, "20");
        state.apply(Action::Submit);
        assert_eq!(state.session.tax_rate, "20");
        let json = serde_json::to_value(state.session.snapshot()).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn settings_add_rename_delete_category() {
        let mut state = app();
        state.apply(Action::Open);
        state.apply(Action::OpenSettings);
        state.apply(Action::Add);
        assert_eq!(state.cat_state.selected(), Some(3));
        state.apply(Action::Rename);
        state.reset_input();
        type_text(&mut state, "Toys");
        state.apply(Action::Submit);
        assert_eq!(state.session.categories[3], "Toys");
        state.apply(Action::Delete);
        assert_eq!(state.session.categories.len(), 3);
        assert_eq!(state.cat_state.selected(), Some(2));
        state.apply(Action::Back);
        assert_eq!(state.screen, Screen::Home);
    }

    #[test]
    fn navigation_wraps_and_jumps_clamp() {
        let mut state = app();
        state.apply(Action::Open);
        state.apply(Action::Previous);
        assert_eq!(state.list_state.selected(), Some(1));
        state.apply(Action::Next);
        assert_eq!(state.list_state.selected(), Some(0));
        state.apply(Action::JumpForward(10));
        assert_eq!(state.list_state.selected(), Some(1));
        state.apply(Action::JumpBackward(10));
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn cursor_editing_handles_multibyte_chars() {
        let mut state = app();
        state.enter_char('é');
        state.enter_char('a');
        state.move_cursor_left();
        state.enter_char('b');
        assert_eq!(state.input_buffer, "éba");
        state.delete_char();
        assert_eq!(state.input_buffer, "éa");
        assert_eq!(state.cursor_position, 1);
    }

    #[test]
    fn open_on_empty_home_does_nothing() {
        let mut state = app();
        state.session.shopping_lists.clear();
        state.apply(Action::Open);
        state.apply(Action::Open);
        assert_eq!(state.screen, Screen::Home);
    }
}
