//! A four-function calculator in a fixed 240x320 window.

use crossterm::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::content::ContentView;
use crate::theme;
use crate::ui::UiFrame;

const KEYPAD: [[char; 4]; 5] = [
    ['C', '±', '%', '÷'],
    ['7', '8', '9', '×'],
    ['4', '5', '6', '-'],
    ['1', '2', '3', '+'],
    ['0', '0', '.', '='],
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => {
                if rhs == 0.0 {
                    f64::NAN
                } else {
                    lhs / rhs
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct CalculatorView {
    entry: String,
    accumulator: Option<f64>,
    pending: Option<Op>,
    /// True right after `=` or an operator: the next digit starts fresh.
    replace_entry: bool,
}

impl CalculatorView {
    pub fn new() -> Self {
        Self {
            entry: "0".to_string(),
            accumulator: None,
            pending: None,
            replace_entry: false,
        }
    }

    fn display(&self) -> String {
        let value: f64 = self.entry.parse().unwrap_or(0.0);
        if value.is_nan() {
            return "Error".to_string();
        }
        self.entry.clone()
    }

    fn press(&mut self, key: char) {
        match key {
            '0'..='9' => {
                if self.replace_entry || self.entry == "0" {
                    self.entry.clear();
                    self.replace_entry = false;
                }
                if self.entry.len() < 12 {
                    self.entry.push(key);
                }
                if self.entry.is_empty() {
                    self.entry.push('0');
                }
            }
            '.' => {
                if self.replace_entry {
                    self.entry = "0".to_string();
                    self.replace_entry = false;
                }
                if !self.entry.contains('.') {
                    self.entry.push('.');
                }
            }
            'C' | 'c' => {
                self.entry = "0".to_string();
                self.accumulator = None;
                self.pending = None;
                self.replace_entry = false;
            }
            '±' => {
                if let Some(stripped) = self.entry.strip_prefix('-') {
                    self.entry = stripped.to_string();
                } else if self.entry != "0" {
                    self.entry.insert(0, '-');
                }
            }
            '%' => {
                let value: f64 = self.entry.parse().unwrap_or(0.0);
                self.set_entry(value / 100.0);
            }
            '+' => self.push_op(Op::Add),
            '-' => self.push_op(Op::Sub),
            '*' | '×' => self.push_op(Op::Mul),
            '/' | '÷' => self.push_op(Op::Div),
            '=' => self.evaluate(),
            _ => {}
        }
    }

    fn push_op(&mut self, op: Op) {
        self.evaluate();
        self.accumulator = Some(self.entry.parse().unwrap_or(0.0));
        self.pending = Some(op);
        self.replace_entry = true;
    }

    fn evaluate(&mut self) {
        if let (Some(acc), Some(op)) = (self.accumulator, self.pending) {
            let rhs: f64 = self.entry.parse().unwrap_or(0.0);
            self.set_entry(op.apply(acc, rhs));
            self.accumulator = None;
            self.pending = None;
        }
        self.replace_entry = true;
    }

    fn set_entry(&mut self, value: f64) {
        if value.is_nan() || value.is_infinite() {
            self.entry = "NaN".to_string();
            return;
        }
        // Trim trailing zeros without switching to scientific notation.
        let formatted = format!("{:.6}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        self.entry = if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        };
    }

    /// Map a click inside the body to a keypad label.
    fn key_at(area: Rect, column: u16, row: u16) -> Option<char> {
        if area.width < 4 || area.height < 2 {
            return None;
        }
        // Row 0 is the display; the keypad starts below it.
        let grid_top = area.y + 2;
        if row < grid_top {
            return None;
        }
        let rows = KEYPAD.len() as u16;
        let grid_height = area.height.saturating_sub(2);
        if grid_height == 0 {
            return None;
        }
        let cell_h = (grid_height / rows).max(1);
        let cell_w = (area.width / 4).max(1);
        let r = ((row - grid_top) / cell_h).min(rows - 1) as usize;
        let c = ((column.saturating_sub(area.x)) / cell_w).min(3) as usize;
        Some(KEYPAD[r][c])
    }
}

impl ContentView for CalculatorView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        let display_style = Style::default()
            .fg(theme::accent())
            .add_modifier(Modifier::BOLD);
        let display = self.display();
        // Right-align the display in the first body row.
        let pad = (area.width as usize).saturating_sub(display.len());
        frame.set_string(
            area.x,
            area.y,
            &format!("{}{}", " ".repeat(pad), display),
            display_style,
        );

        let rows = KEYPAD.len() as u16;
        let grid_top = area.y + 2;
        let grid_height = area.height.saturating_sub(2);
        if grid_height == 0 {
            return;
        }
        let cell_h = (grid_height / rows).max(1);
        let cell_w = (area.width / 4).max(1);
        let key_style = if focused {
            Style::default().fg(theme::menu_fg())
        } else {
            Style::default().fg(theme::header_fg())
        };
        for (r, keys) in KEYPAD.iter().enumerate() {
            for (c, key) in keys.iter().enumerate() {
                // The zero key spans two columns; skip its duplicate.
                if r == 4 && c == 1 {
                    continue;
                }
                let x = area.x + c as u16 * cell_w + cell_w / 2;
                let y = grid_top + r as u16 * cell_h + cell_h / 2;
                frame.set_string(x, y, &key.to_string(), key_style);
            }
        }
    }

    fn handle_event(&mut self, event: &Event, area: Rect) -> bool {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Char(c @ ('0'..='9' | '.' | '+' | '-' | '*' | '/' | '%' | 'c' | 'C')) => {
                    self.press(c);
                    true
                }
                KeyCode::Char('=') | KeyCode::Enter => {
                    self.press('=');
                    true
                }
                KeyCode::Backspace => {
                    self.press('C');
                    true
                }
                _ => false,
            },
            Event::Mouse(me) => {
                if me.kind == MouseEventKind::Down(MouseButton::Left)
                    && let Some(key) = Self::key_at(area, me.column, me.row)
                {
                    self.press(key);
                    return true;
                }
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(calc: &mut CalculatorView, keys: &str) {
        for k in keys.chars() {
            calc.press(k);
        }
    }

    #[test]
    fn chained_arithmetic() {
        let mut calc = CalculatorView::new();
        feed(&mut calc, "12+3=");
        assert_eq!(calc.display(), "15");
        feed(&mut calc, "*2=");
        assert_eq!(calc.display(), "30");
    }

    #[test]
    fn division_by_zero_shows_error() {
        let mut calc = CalculatorView::new();
        feed(&mut calc, "5/0=");
        assert_eq!(calc.display(), "Error");
        feed(&mut calc, "C1+1=");
        assert_eq!(calc.display(), "2");
    }

    #[test]
    fn decimal_entry_has_single_point() {
        let mut calc = CalculatorView::new();
        feed(&mut calc, "1.5.5");
        assert_eq!(calc.display(), "1.55");
    }

    #[test]
    fn sign_toggle() {
        let mut calc = CalculatorView::new();
        feed(&mut calc, "42±");
        assert_eq!(calc.display(), "-42");
        feed(&mut calc, "±");
        assert_eq!(calc.display(), "42");
    }
}
