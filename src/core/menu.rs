//! Menu bar model.
//!
//! Shared by both front-ends. Drawing lives in
//! terminal/renderers/menu_renderer.rs; this module only tracks which menu is
//! open and which item is highlighted, and answers hit-tests.

/// Height of the menu bar in cells
pub const MENU_BAR_HEIGHT_CELLS: usize = 1;

/// A single menu item (action or separator)
#[derive(Clone, Debug, PartialEq)]
pub enum MenuItem {
    /// Runs `command` when chosen; `hotkey` is only a label
    Action {
        label: &'static str,
        command: &'static str,
        hotkey: Option<&'static str>,
    },
    Separator,
}

impl MenuItem {
    pub const fn action(
        label: &'static str,
        command: &'static str,
        hotkey: Option<&'static str>,
    ) -> Self {
        MenuItem::Action {
            label,
            command,
            hotkey,
        }
    }

    pub const fn separator() -> Self {
        MenuItem::Separator
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, MenuItem::Separator)
    }
}

/// A dropdown menu (column of MenuItems)
#[derive(Clone, Debug)]
pub struct Menu {
    /// Menu title (shown in menu bar)
    pub title: &'static str,
    pub items: Vec<MenuItem>,
    /// Highlighted item index (None while closed)
    pub selected: Option<usize>,
}

impl Menu {
    pub fn new(title: &'static str, items: Vec<MenuItem>) -> Self {
        Self {
            title,
            items,
            selected: None,
        }
    }

    /// Index of the first selectable item
    fn first_action(&self) -> Option<usize> {
        self.items.iter().position(|item| !item.is_separator())
    }

    /// Move selection down, skipping separators and wrapping at the bottom
    pub fn select_next(&mut self) {
        self.step(1);
    }

    /// Move selection up, skipping separators and wrapping at the top
    pub fn select_prev(&mut self) {
        self.step(self.items.len().saturating_sub(1));
    }

    fn step(&mut self, delta: usize) {
        let max = self.items.len();
        if self.first_action().is_none() {
            return;
        }

        let mut idx = self.selected.unwrap_or(0);
        loop {
            idx = (idx + delta) % max;
            if !self.items[idx].is_separator() {
                break;
            }
        }
        self.selected = Some(idx);
    }

    /// Highlight an item by index; separators are not selectable
    pub fn select(&mut self, idx: usize) -> bool {
        match self.items.get(idx) {
            Some(item) if !item.is_separator() => {
                self.selected = Some(idx);
                true
            }
            _ => false,
        }
    }

    /// Command of the highlighted item
    pub fn selected_command(&self) -> Option<&'static str> {
        match self.selected.and_then(|idx| self.items.get(idx)) {
            Some(MenuItem::Action { command, .. }) => Some(*command),
            _ => None,
        }
    }

    /// Width of the dropdown box, borders included
    pub fn render_width(&self) -> usize {
        let max_label = self
            .items
            .iter()
            .map(|item| match item {
                MenuItem::Action { label, hotkey, .. } => {
                    let hotkey_len = hotkey.map_or(0, |h| h.len() + 2);
                    label.len() + hotkey_len
                }
                MenuItem::Separator => 3,
            })
            .max()
            .unwrap_or(10);

        max_label + 4
    }
}

/// The menu bar containing all top-level menus
#[derive(Clone, Debug)]
pub struct MenuBar {
    pub menus: Vec<Menu>,
    /// Open menu index (None if all closed)
    pub active_menu: Option<usize>,
}

/// Where a click on the screen landed relative to the menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuHit {
    /// On a menu title in the bar
    Title(usize),
    /// On an item row of the open dropdown
    Item(usize),
    /// Inside the open dropdown but not on a selectable item
    Inert,
    /// Anywhere else
    Outside,
}

impl MenuBar {
    pub fn new() -> Self {
        Self {
            menus: vec![Self::file_menu()],
            active_menu: None,
        }
    }

    fn file_menu() -> Menu {
        Menu::new(
            "File",
            vec![
                MenuItem::action("Open...", "open-file", Some("^O")),
                MenuItem::action("Save...", "save-file", Some("^S")),
                MenuItem::separator(),
                MenuItem::action("Exit", "exit", Some("^Q")),
            ],
        )
    }

    /// Open a menu by index with its first item highlighted
    pub fn open_menu(&mut self, index: usize) {
        if index < self.menus.len() {
            if let Some(old_idx) = self.active_menu {
                self.menus[old_idx].selected = None;
            }
            self.active_menu = Some(index);
            let first = self.menus[index].first_action();
            self.menus[index].selected = first;
        }
    }

    /// Open the menu whose title starts with `c` (Alt-F for File)
    pub fn open_by_mnemonic(&mut self, c: char) -> bool {
        let found = self.menus.iter().position(|m| {
            m.title
                .chars()
                .next()
                .is_some_and(|t| t.eq_ignore_ascii_case(&c))
        });
        match found {
            Some(idx) => {
                self.open_menu(idx);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        if let Some(idx) = self.active_menu {
            self.menus[idx].selected = None;
        }
        self.active_menu = None;
    }

    /// Move to next menu (right)
    pub fn next_menu(&mut self) {
        if let Some(idx) = self.active_menu {
            let next = (idx + 1) % self.menus.len();
            self.open_menu(next);
        }
    }

    /// Move to previous menu (left)
    pub fn prev_menu(&mut self) {
        if let Some(idx) = self.active_menu {
            let prev = if idx == 0 {
                self.menus.len() - 1
            } else {
                idx - 1
            };
            self.open_menu(prev);
        }
    }

    pub fn active(&mut self) -> Option<&mut Menu> {
        self.active_menu.map(|idx| &mut self.menus[idx])
    }

    /// Close the menu and return the highlighted command
    pub fn execute_selected(&mut self) -> Option<&'static str> {
        let cmd = self
            .active_menu
            .and_then(|idx| self.menus[idx].selected_command());
        self.close();
        cmd
    }

    pub fn is_open(&self) -> bool {
        self.active_menu.is_some()
    }

    /// Title layout as (title, x_start, x_end) in screen columns
    pub fn layout(&self) -> Vec<(&'static str, usize, usize)> {
        let mut result = Vec::new();
        let mut x = 1;
        for menu in &self.menus {
            let title_len = menu.title.len() + 2;
            result.push((menu.title, x, x + title_len));
            x += title_len + 1;
        }
        result
    }

    /// Classify a click at screen cell (col, row).
    ///
    /// The dropdown of the open menu is drawn directly under its title with a
    /// one-cell border, so its items start at row `MENU_BAR_HEIGHT_CELLS + 1`.
    pub fn hit_test(&self, col: usize, row: usize) -> MenuHit {
        let layout = self.layout();
        if row < MENU_BAR_HEIGHT_CELLS {
            return layout
                .iter()
                .position(|(_, start, end)| col >= *start && col < *end)
                .map_or(MenuHit::Outside, MenuHit::Title);
        }

        let Some(idx) = self.active_menu else {
            return MenuHit::Outside;
        };
        let menu = &self.menus[idx];
        let left = layout[idx].1;
        let right = left + menu.render_width();
        let top = MENU_BAR_HEIGHT_CELLS;
        let bottom = top + menu.items.len() + 2;

        if col < left || col >= right || row >= bottom {
            return MenuHit::Outside;
        }
        if row == top || row == bottom - 1 {
            return MenuHit::Inert;
        }
        let item = row - top - 1;
        if menu.items[item].is_separator() {
            MenuHit::Inert
        } else {
            MenuHit::Item(item)
        }
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_menu_items() {
        let bar = MenuBar::new();
        assert_eq!(bar.menus.len(), 1);
        let commands: Vec<_> = bar.menus[0]
            .items
            .iter()
            .filter_map(|item| match item {
                MenuItem::Action { command, .. } => Some(*command),
                MenuItem::Separator => None,
            })
            .collect();
        assert_eq!(commands, vec!["open-file", "save-file", "exit"]);
    }

    #[test]
    fn test_menu_open_and_close() {
        let mut bar = MenuBar::new();
        assert!(!bar.is_open());

        bar.open_menu(0);
        assert!(bar.is_open());
        assert_eq!(bar.menus[0].selected, Some(0));

        // Single menu: left/right stay on File
        bar.next_menu();
        assert_eq!(bar.active_menu, Some(0));
        bar.prev_menu();
        assert_eq!(bar.active_menu, Some(0));

        bar.close();
        assert!(!bar.is_open());
        assert_eq!(bar.menus[0].selected, None);
    }

    #[test]
    fn test_selection_skips_separator() {
        let mut bar = MenuBar::new();
        bar.open_menu(0);
        let menu = bar.active().unwrap();
        menu.select_next();
        assert_eq!(menu.selected, Some(1));
        menu.select_next();
        assert_eq!(menu.selected, Some(3));
        menu.select_next();
        assert_eq!(menu.selected, Some(0));
        menu.select_prev();
        assert_eq!(menu.selected, Some(3));
        menu.select_prev();
        assert_eq!(menu.selected, Some(1));
    }

    #[test]
    fn test_execute_selected() {
        let mut bar = MenuBar::new();
        bar.open_menu(0);
        bar.active().unwrap().select_prev();

        assert_eq!(bar.execute_selected(), Some("exit"));
        assert!(!bar.is_open());
    }

    #[test]
    fn test_open_by_mnemonic() {
        let mut bar = MenuBar::new();
        assert!(bar.open_by_mnemonic('f'));
        assert!(bar.is_open());
        bar.close();
        assert!(!bar.open_by_mnemonic('z'));
    }

    #[test]
    fn test_hit_test() {
        let mut bar = MenuBar::new();
        // "File" title spans columns 1..7
        assert_eq!(bar.hit_test(2, 0), MenuHit::Title(0));
        assert_eq!(bar.hit_test(20, 0), MenuHit::Outside);
        assert_eq!(bar.hit_test(2, 2), MenuHit::Outside);

        bar.open_menu(0);
        assert_eq!(bar.hit_test(2, 1), MenuHit::Inert);
        assert_eq!(bar.hit_test(2, 2), MenuHit::Item(0));
        assert_eq!(bar.hit_test(2, 3), MenuHit::Item(1));
        assert_eq!(bar.hit_test(2, 4), MenuHit::Inert);
        assert_eq!(bar.hit_test(2, 5), MenuHit::Item(3));
        assert_eq!(bar.hit_test(60, 5), MenuHit::Outside);
    }
}
