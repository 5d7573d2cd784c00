//! Markdown document panels for the static portfolio windows.

use crossterm::event::{Event, KeyCode, MouseEventKind};
use pulldown_cmark::{Event as MdEvent, Options, Parser, Tag};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::content::{ContentView, ScrollState};
use crate::ui::UiFrame;

#[derive(Debug)]
pub struct MarkdownView {
    text: Text<'static>,
    scroll: ScrollState,
}

impl MarkdownView {
    pub fn new(raw: &str) -> Self {
        Self {
            text: markdown_to_text(raw),
            scroll: ScrollState::default(),
        }
    }
}

impl ContentView for MarkdownView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _focused: bool) {
        self.scroll
            .apply(self.text.lines.len(), area.height as usize);
        let paragraph = Paragraph::new(self.text.clone())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll.offset as u16, 0));
        frame.render_widget(paragraph, area);
    }

    fn handle_event(&mut self, event: &Event, area: Rect) -> bool {
        match event {
            Event::Mouse(me) => match me.kind {
                MouseEventKind::ScrollUp => {
                    self.scroll.bump(-3);
                    true
                }
                MouseEventKind::ScrollDown => {
                    self.scroll.bump(3);
                    true
                }
                _ => false,
            },
            Event::Key(key) => {
                let page = (area.height as isize).max(1);
                match key.code {
                    KeyCode::Up => self.scroll.bump(-1),
                    KeyCode::Down => self.scroll.bump(1),
                    KeyCode::PageUp => self.scroll.bump(-page),
                    KeyCode::PageDown => self.scroll.bump(page),
                    KeyCode::Home => self.scroll.reset(),
                    KeyCode::End => self.scroll.bump(isize::MAX),
                    _ => return false,
                }
                true
            }
            _ => false,
        }
    }
}

/// Flatten a markdown source into styled terminal lines. Headings and
/// strong text render bold, inline and block code in yellow, lists with
/// indent-aware bullets.
pub fn markdown_to_text(raw: &str) -> Text<'static> {
    let parser = Parser::new_ext(raw, Options::all());

    let mut lines: Vec<Vec<Span<'static>>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    let mut list_start: Vec<Option<usize>> = Vec::new();
    let mut list_count: Vec<usize> = Vec::new();
    #[derive(Debug, Clone, Copy)]
    enum TagKind {
        Strong,
        Emphasis,
        Heading,
        List,
        Item,
        CodeBlock,
        Paragraph,
        Other,
    }
    let mut tag_stack: Vec<TagKind> = Vec::new();
    let mut bold = false;
    let mut italic = false;
    let mut in_code_block = false;

    for ev in parser {
        match ev {
            MdEvent::Start(tag) => match tag {
                Tag::Strong => {
                    tag_stack.push(TagKind::Strong);
                    bold = true;
                }
                Tag::Emphasis => {
                    tag_stack.push(TagKind::Emphasis);
                    italic = true;
                }
                Tag::List(start) => {
                    tag_stack.push(TagKind::List);
                    list_start.push(start.map(|n| n as usize));
                    list_count.push(0);
                }
                Tag::Item => {
                    tag_stack.push(TagKind::Item);
                    if let Some(last) = list_count.last_mut() {
                        *last = last.saturating_add(1);
                    }
                    let indent = "  ".repeat(list_count.len().saturating_sub(1));
                    let bullet = if let Some(start) = list_start.last().and_then(|s| *s) {
                        let idx = list_count.last().copied().unwrap_or(1);
                        format!("{}{}. ", indent, start + idx - 1)
                    } else {
                        format!("{}- ", indent)
                    };
                    current.push(Span::raw(bullet));
                }
                Tag::CodeBlock(_) => {
                    tag_stack.push(TagKind::CodeBlock);
                    in_code_block = true;
                }
                Tag::Paragraph => {
                    tag_stack.push(TagKind::Paragraph);
                }
                Tag::Heading { .. } => {
                    tag_stack.push(TagKind::Heading);
                    bold = true;
                }
                _ => tag_stack.push(TagKind::Other),
            },
            MdEvent::End(_) => {
                if let Some(kind) = tag_stack.pop() {
                    match kind {
                        TagKind::Strong => bold = false,
                        TagKind::Emphasis => italic = false,
                        TagKind::Item => {
                            if !current.is_empty() {
                                lines.push(std::mem::take(&mut current));
                            }
                        }
                        TagKind::List => {
                            list_start.pop();
                            list_count.pop();
                            let in_parent_item =
                                tag_stack.iter().any(|k| matches!(k, TagKind::Item));
                            if !in_parent_item {
                                lines.push(vec![Span::raw("")]);
                            }
                        }
                        TagKind::CodeBlock => in_code_block = false,
                        TagKind::Paragraph => {
                            lines.push(std::mem::take(&mut current));
                            let in_item = tag_stack.iter().any(|k| matches!(k, TagKind::Item));
                            if !in_item {
                                lines.push(vec![Span::raw("")]);
                            }
                        }
                        TagKind::Heading => {
                            bold = false;
                            lines.push(std::mem::take(&mut current));
                            lines.push(vec![Span::raw("")]);
                        }
                        TagKind::Other => {}
                    }
                }
            }
            MdEvent::Text(text) => {
                let mut style = Style::default();
                if bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if italic {
                    style = style.add_modifier(Modifier::ITALIC);
                }
                if in_code_block {
                    style = Style::default().fg(Color::Yellow);
                }
                current.push(Span::styled(text.to_string(), style));
            }
            MdEvent::Code(text) => {
                current.push(Span::styled(
                    text.to_string(),
                    Style::default().fg(Color::Yellow),
                ));
            }
            MdEvent::SoftBreak => {
                if in_code_block {
                    lines.push(std::mem::take(&mut current));
                } else {
                    current.push(Span::raw(" "));
                }
            }
            MdEvent::HardBreak => {
                lines.push(std::mem::take(&mut current));
            }
            MdEvent::Rule => {
                lines.push(vec![Span::raw("─")]);
            }
            _ => {}
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(vec![Span::raw("")]);
    }

    Text::from(lines.into_iter().map(Line::from).collect::<Vec<_>>())
}

/// Embedded portfolio documents.
pub mod docs {
    use indoc::indoc;

    pub const RESUME: &str = indoc! {"
        # Resume

        **Sam Keller** — systems and interface engineer.

        ## Experience

        - **Senior Engineer, Latchworks** (2022 - present)
          Own the realtime collaboration backend and its terminal tooling.
          Cut sync latency from 900ms to 80ms by replacing polling with a
          delta stream.
        - **Engineer, Fernhollow Labs** (2019 - 2022)
          Built the in-house build cache and the CLI the whole org ships
          with. On-call for the artifact store.
        - **Junior Developer, Брусника Media** (2017 - 2019)
          Shipped embeddable media widgets and learned to love profilers.

        ## Skills

        - Rust, TypeScript, Go
        - Terminal UIs, network protocols, storage engines
        - `perf`, flamegraphs, and reading other people's core dumps

        ## Education

        B.Sc. Computer Science, 2017.
    "};

    pub const ABOUT: &str = indoc! {"
        # About

        Hi, I'm Sam. This desktop is my portfolio: every window is a small
        program, and the window manager underneath is the actual exhibit.

        Drag windows by their title bars, resize from any edge or corner,
        minimize to the taskbar, maximize to fill the screen. Positions and
        sizes persist between visits.

        Away from a keyboard I fix bicycles and lose at chess.
    "};

    pub const PROJECTS: &str = indoc! {"
        # Projects

        ## term-desk

        The thing you're looking at. A desktop environment that runs in a
        terminal: overlapping windows, pixel-space geometry projected onto
        character cells, durable window placement.

        ## driftcache

        A read-through cache with TTL jitter so expiry storms can't happen.
        Used in production at two former employers.

        ## chorde

        A toy distributed hash table, built to understand finger tables.
        *Not* used in production anywhere, thankfully.

        ## patchbay

        Terminal MIDI router. Patch cables drawn in box characters.
    "};

    pub const CONTACT: &str = indoc! {"
        # Contact

        - Email: `sam@keller.dev`
        - GitHub: `github.com/samkeller`
        - Based in Rotterdam, usually responsive within a day.

        The GitHub window on this desktop mirrors my public profile if you
        would rather browse than write.
    "};
}
