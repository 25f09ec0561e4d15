//! Record Dialog Component
//!
//! Field cursor state and widget for the new, edit and view dialog. Field
//! values live in the screen's draft; only the cursor and the typed expiry
//! text are kept here.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Clear, Widget},
};

use crate::input::modes::prev_boundary;
use crate::screen::{DialogMode, Draft, ExpiryInput, FieldErrors, Translator};

use super::popup::centered_rect_fixed;

/// Dialog field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    AppId,
    Name,
    Secret,
    Status,
    Expired,
    Desc,
}

impl FieldKind {
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::AppId => "app.appId",
            Self::Name => "app.name",
            Self::Secret => "app.secret",
            Self::Status => "app.status",
            Self::Expired => "app.expired",
            Self::Desc => "app.desc",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::AppId | Self::Name)
    }
}

const EDIT_FIELDS: &[FieldKind] = &[
    FieldKind::AppId,
    FieldKind::Name,
    FieldKind::Status,
    FieldKind::Expired,
    FieldKind::Desc,
];

const VIEW_FIELDS: &[FieldKind] = &[
    FieldKind::AppId,
    FieldKind::Secret,
    FieldKind::Name,
    FieldKind::Status,
    FieldKind::Expired,
    FieldKind::Desc,
];

/// Fields shown for a dialog mode, in display order
pub fn fields_for(mode: DialogMode) -> &'static [FieldKind] {
    match mode {
        DialogMode::View => VIEW_FIELDS,
        DialogMode::New | DialogMode::Edit => EDIT_FIELDS,
    }
}

/// Identity fields are fixed once a record exists
pub fn is_editable(field: FieldKind, mode: DialogMode) -> bool {
    match mode {
        DialogMode::View => false,
        DialogMode::Edit => matches!(field, FieldKind::Status | FieldKind::Expired | FieldKind::Desc),
        DialogMode::New => field != FieldKind::Secret,
    }
}

/// Cursor state of the open dialog
#[derive(Debug, Clone, Default)]
pub struct DialogForm {
    pub active: usize,
    pub cursor: usize,
    pub expiry_text: String,
    pub show_secret: bool,
    revision: Option<u64>,
}

impl DialogForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset when the screen has swapped in a new draft
    pub fn sync(&mut self, mode: DialogMode, draft: &Draft, revision: u64) {
        if self.revision == Some(revision) {
            return;
        }
        self.revision = Some(revision);
        self.expiry_text = draft.expired.picker_text();
        self.show_secret = false;

        let fields = fields_for(mode);
        self.active = fields.iter().position(|f| is_editable(*f, mode)).unwrap_or(0);
        self.cursor = self.text(fields[self.active], draft).map_or(0, str::len);
    }

    pub fn active_field(&self, mode: DialogMode) -> FieldKind {
        let fields = fields_for(mode);
        fields[self.active.min(fields.len() - 1)]
    }

    pub fn next_field(&mut self, mode: DialogMode, draft: &Draft) {
        self.step(mode, draft, true);
    }

    pub fn prev_field(&mut self, mode: DialogMode, draft: &Draft) {
        self.step(mode, draft, false);
    }

    // skips read-only fields unless nothing is editable
    fn step(&mut self, mode: DialogMode, draft: &Draft, forward: bool) {
        let fields = fields_for(mode);
        let len = fields.len();
        let any_editable = fields.iter().any(|f| is_editable(*f, mode));

        let mut index = self.active.min(len - 1);
        for _ in 0..len {
            index = if forward { (index + 1) % len } else { (index + len - 1) % len };
            if !any_editable || is_editable(fields[index], mode) {
                break;
            }
        }

        self.active = index;
        self.cursor = self.text(fields[index], draft).map_or(0, str::len);
    }

    fn text<'a>(&'a self, field: FieldKind, draft: &'a Draft) -> Option<&'a str> {
        match field {
            FieldKind::AppId => Some(&draft.app_id),
            FieldKind::Name => Some(&draft.name),
            FieldKind::Secret => Some(&draft.secret),
            FieldKind::Desc => Some(&draft.desc),
            FieldKind::Expired => Some(&self.expiry_text),
            FieldKind::Status => None,
        }
    }

    fn text_mut<'a>(&'a mut self, field: FieldKind, draft: &'a mut Draft) -> Option<&'a mut String> {
        match field {
            FieldKind::AppId => Some(&mut draft.app_id),
            FieldKind::Name => Some(&mut draft.name),
            FieldKind::Desc => Some(&mut draft.desc),
            FieldKind::Expired => Some(&mut self.expiry_text),
            FieldKind::Secret | FieldKind::Status => None,
        }
    }

    /// Field to edit and a cursor that is valid for it
    fn editable_text(&self, mode: DialogMode, draft: &Draft) -> Option<(FieldKind, usize)> {
        let field = self.active_field(mode);
        if !is_editable(field, mode) {
            return None;
        }
        let text = self.text(field, draft)?;
        let cursor = if text.is_char_boundary(self.cursor) { self.cursor } else { text.len() };
        Some((field, cursor))
    }

    pub fn insert_char(&mut self, mode: DialogMode, draft: &mut Draft, c: char) {
        let Some((field, cursor)) = self.editable_text(mode, draft) else { return };
        let Some(text) = self.text_mut(field, draft) else { return };
        text.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
        self.after_edit(field, draft);
    }

    /// Backspace
    pub fn delete_char(&mut self, mode: DialogMode, draft: &mut Draft) {
        let Some((field, cursor)) = self.editable_text(mode, draft) else { return };
        let Some(text) = self.text_mut(field, draft) else { return };
        let Some(prev) = prev_boundary(text, cursor) else { return };
        text.remove(prev);
        self.cursor = prev;
        self.after_edit(field, draft);
    }

    pub fn cursor_left(&mut self, mode: DialogMode, draft: &Draft) {
        let Some((field, cursor)) = self.editable_text(mode, draft) else { return };
        if let Some(prev) = self.text(field, draft).and_then(|t| prev_boundary(t, cursor)) {
            self.cursor = prev;
        }
    }

    pub fn cursor_right(&mut self, mode: DialogMode, draft: &Draft) {
        let Some((field, cursor)) = self.editable_text(mode, draft) else { return };
        if let Some(c) = self.text(field, draft).and_then(|t| t[cursor..].chars().next()) {
            self.cursor = cursor + c.len_utf8();
        }
    }

    pub fn toggle_status(&mut self, mode: DialogMode, draft: &mut Draft) {
        if self.active_field(mode) == FieldKind::Status && is_editable(FieldKind::Status, mode) {
            draft.status = !draft.status;
        }
    }

    pub fn toggle_secret(&mut self) {
        self.show_secret = !self.show_secret;
    }

    fn after_edit(&mut self, field: FieldKind, draft: &mut Draft) {
        if field == FieldKind::Expired {
            draft.expired = ExpiryInput::from_picker_text(&self.expiry_text);
        }
    }
}

/// Record dialog widget
pub struct DialogWidget<'a> {
    form: &'a DialogForm,
    mode: DialogMode,
    draft: &'a Draft,
    errors: &'a FieldErrors,
    translator: &'a dyn Translator,
    docs_url: &'a str,
    busy: bool,
}

impl<'a> DialogWidget<'a> {
    pub fn new(
        form: &'a DialogForm,
        mode: DialogMode,
        draft: &'a Draft,
        errors: &'a FieldErrors,
        translator: &'a dyn Translator,
    ) -> Self {
        Self {
            form,
            mode,
            draft,
            errors,
            translator,
            docs_url: "",
            busy: false,
        }
    }

    pub fn docs_url(mut self, url: &'a str) -> Self {
        self.docs_url = url;
        self
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    fn error_for(&self, field: FieldKind) -> Option<&'a str> {
        match field {
            FieldKind::AppId => self.errors.app_id.as_deref(),
            FieldKind::Name => self.errors.name.as_deref(),
            _ => None,
        }
    }

    fn display_value(&self, field: FieldKind) -> Span<'a> {
        let t = self.translator;
        match field {
            FieldKind::Status => {
                let (text, color) = if self.draft.status {
                    (format!("[x] {}", t.translate("app.enable")), Color::Green)
                } else {
                    (format!("[ ] {}", t.translate("app.disable")), Color::DarkGray)
                };
                Span::styled(text, Style::default().fg(color))
            }
            FieldKind::Secret if !self.form.show_secret => {
                Span::styled("*".repeat(self.draft.secret.chars().count()), Style::default().fg(Color::Green))
            }
            FieldKind::Secret => Span::styled(self.draft.secret.clone(), Style::default().fg(Color::Green)),
            FieldKind::Expired if self.form.expiry_text.is_empty() => {
                Span::styled(t.translate("app.expiredText"), Style::default().fg(Color::DarkGray))
            }
            FieldKind::Expired => Span::raw(self.form.expiry_text.clone()),
            FieldKind::AppId => Span::raw(self.draft.app_id.clone()),
            FieldKind::Name => Span::raw(self.draft.name.clone()),
            FieldKind::Desc => Span::raw(self.draft.desc.clone()),
        }
    }

    fn footer(&self) -> Line<'static> {
        let key = Style::default().fg(Color::Magenta);
        let mut spans = match self.mode {
            DialogMode::View => vec![
                Span::styled("y", key),
                Span::raw(" copy id  "),
                Span::styled("Y", key),
                Span::raw(" copy secret  "),
                Span::styled("s", key),
                Span::raw(" show secret  "),
                Span::styled("Esc", key),
                Span::raw(" close"),
            ],
            DialogMode::New | DialogMode::Edit => vec![
                Span::styled("Tab", key),
                Span::raw(" next  "),
                Span::styled("Space", key),
                Span::raw(" toggle  "),
                Span::styled("Enter", key),
                Span::raw(format!(" {}  ", self.translator.translate("oper.save"))),
                Span::styled("Esc", key),
                Span::raw(format!(" {}", self.translator.translate("oper.cancel"))),
            ],
        };
        if self.busy {
            spans.push(Span::styled("  ⟳", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    }
}

const LABEL_WIDTH: u16 = 16;

impl Widget for DialogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fields = fields_for(self.mode);
        let guide_rows = if self.mode == DialogMode::View { 3 } else { 0 };
        let height = fields.len() as u16 * 2 + guide_rows + 3;
        let popup = centered_rect_fixed(76, height, area);

        Clear.render(popup, buf);

        let title = format!(" {} ", self.translator.translate(self.mode.title_key()));
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let active = self.form.active_field(self.mode);
        let value_x = inner.x + LABEL_WIDTH;
        let value_width = inner.width.saturating_sub(LABEL_WIDTH + 1);
        let mut y = inner.y;

        for field in fields {
            if y + 1 >= inner.y + inner.height {
                break;
            }
            let is_active = *field == active;
            let editable = is_editable(*field, self.mode);

            let marker = if field.is_required() && self.mode != DialogMode::View { "*" } else { "" };
            let label = format!("{}{}:", self.translator.translate(field.label_key()), marker);
            let label_style = if is_active {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            buf.set_stringn(inner.x, y, &label, LABEL_WIDTH as usize - 1, label_style);

            let bg = if is_active && editable { Color::DarkGray } else { Color::Black };
            buf.set_style(Rect::new(value_x, y, value_width, 1), Style::default().bg(bg));

            let mut value = self.display_value(*field);
            if !editable && !matches!(field, FieldKind::Secret | FieldKind::Status) {
                value = value.patch_style(Style::default().add_modifier(Modifier::DIM));
            }
            buf.set_line(value_x, y, &Line::from(value), value_width);

            if is_active && editable && *field != FieldKind::Status {
                if let Some(text) = self.form.text(*field, self.draft) {
                    let before = text.get(..self.form.cursor).unwrap_or(text);
                    let cursor_x = value_x + Line::from(before).width() as u16;
                    if cursor_x < value_x + value_width {
                        if let Some(cell) = buf.cell_mut((cursor_x, y)) {
                            cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
                        }
                    }
                }
            }

            if let Some(err) = self.error_for(*field) {
                buf.set_stringn(value_x, y + 1, err, value_width as usize, Style::default().fg(Color::Red));
            }

            y += 2;
        }

        if self.mode == DialogMode::View && y + 1 < inner.y + inner.height {
            let guide = Line::from(vec![
                Span::styled(self.translator.translate("app.guide"), Style::default().fg(Color::Gray)),
                Span::raw(" "),
                Span::styled(
                    self.translator.translate("app.docs"),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
            ]);
            buf.set_line(inner.x, y, &guide, inner.width);
            let link = Span::styled(self.docs_url, Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED));
            buf.set_span(inner.x, y + 1, &link, inner.width);
        }

        let help_y = inner.y + inner.height.saturating_sub(1);
        buf.set_line(inner.x, help_y, &self.footer(), inner.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Catalog, Language};

    fn draft() -> Draft {
        Draft {
            app_id: "a1".into(),
            name: "svc".into(),
            secret: "s3cr3t".into(),
            ..Draft::default()
        }
    }

    #[test]
    fn test_editability_per_mode() {
        assert!(is_editable(FieldKind::AppId, DialogMode::New));
        assert!(!is_editable(FieldKind::AppId, DialogMode::Edit));
        assert!(!is_editable(FieldKind::Name, DialogMode::Edit));
        assert!(is_editable(FieldKind::Desc, DialogMode::Edit));
        assert!(!is_editable(FieldKind::Secret, DialogMode::New));
        for field in VIEW_FIELDS {
            assert!(!is_editable(*field, DialogMode::View));
        }
    }

    #[test]
    fn test_sync_focuses_first_editable_field() {
        let mut form = DialogForm::new();
        form.sync(DialogMode::Edit, &draft(), 1);
        assert_eq!(form.active_field(DialogMode::Edit), FieldKind::Status);

        form.sync(DialogMode::New, &draft(), 2);
        assert_eq!(form.active_field(DialogMode::New), FieldKind::AppId);
        assert_eq!(form.cursor, 2);
    }

    #[test]
    fn test_navigation_skips_read_only_fields() {
        let d = draft();
        let mut form = DialogForm::new();
        form.sync(DialogMode::Edit, &d, 1);

        form.next_field(DialogMode::Edit, &d);
        assert_eq!(form.active_field(DialogMode::Edit), FieldKind::Expired);
        form.next_field(DialogMode::Edit, &d);
        assert_eq!(form.active_field(DialogMode::Edit), FieldKind::Desc);
        form.next_field(DialogMode::Edit, &d);
        assert_eq!(form.active_field(DialogMode::Edit), FieldKind::Status);
        form.prev_field(DialogMode::Edit, &d);
        assert_eq!(form.active_field(DialogMode::Edit), FieldKind::Desc);
    }

    #[test]
    fn test_typing_edits_draft() {
        let mut d = draft();
        let mut form = DialogForm::new();
        form.sync(DialogMode::New, &d, 1);
        form.next_field(DialogMode::New, &d);

        form.insert_char(DialogMode::New, &mut d, '-');
        form.insert_char(DialogMode::New, &mut d, '接');
        assert_eq!(d.name, "svc-接");

        form.delete_char(DialogMode::New, &mut d);
        assert_eq!(d.name, "svc-");

        form.cursor_left(DialogMode::New, &d);
        form.insert_char(DialogMode::New, &mut d, 'x');
        assert_eq!(d.name, "svcx-");
    }

    #[test]
    fn test_read_only_field_ignores_input() {
        let mut d = draft();
        let mut form = DialogForm::new();
        form.sync(DialogMode::View, &d, 1);
        form.insert_char(DialogMode::View, &mut d, 'z');
        form.delete_char(DialogMode::View, &mut d);
        assert_eq!(d.app_id, "a1");
    }

    #[test]
    fn test_expiry_text_updates_draft() {
        let mut d = draft();
        let mut form = DialogForm::new();
        form.sync(DialogMode::Edit, &d, 1);
        form.next_field(DialogMode::Edit, &d);
        assert_eq!(form.active_field(DialogMode::Edit), FieldKind::Expired);

        for c in "2030-01-0".chars() {
            form.insert_char(DialogMode::Edit, &mut d, c);
        }
        assert_eq!(d.expired, ExpiryInput::Empty);

        form.insert_char(DialogMode::Edit, &mut d, '1');
        assert_eq!(d.expired.picker_text(), "2030-01-01");
    }

    #[test]
    fn test_toggle_status_only_on_status_field() {
        let mut d = draft();
        let mut form = DialogForm::new();
        form.sync(DialogMode::New, &d, 1);
        form.toggle_status(DialogMode::New, &mut d);
        assert!(d.status);

        form.sync(DialogMode::Edit, &d, 2);
        form.toggle_status(DialogMode::Edit, &mut d);
        assert!(!d.status);
    }

    #[test]
    fn test_view_dialog_masks_secret_and_links_docs() {
        let catalog = Catalog::new(Language::Zh);
        let d = draft();
        let mut form = DialogForm::new();
        form.sync(DialogMode::View, &d, 1);
        let errors = FieldErrors::default();

        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        DialogWidget::new(&form, DialogMode::View, &d, &errors, &catalog)
            .docs_url(Language::Zh.docs_url())
            .render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("******"));
        assert!(!text.contains("s3cr3t"));
        assert!(text.contains("/cn/"));
    }

    #[test]
    fn test_field_errors_rendered() {
        let catalog = Catalog::new(Language::En);
        let d = Draft::default();
        let mut form = DialogForm::new();
        form.sync(DialogMode::New, &d, 1);
        let errors = FieldErrors { app_id: Some("Required".into()), name: None };

        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        DialogWidget::new(&form, DialogMode::New, &d, &errors, &catalog).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Required"));
        assert!(text.contains("New App"));
    }
}
