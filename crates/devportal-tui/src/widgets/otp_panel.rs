//! Phone verification panel

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use devportal_app::otp::{OtpState, OtpStep, CODE_LEN, PHONE_LEN};
use devportal_core::Localizer;

use super::modal_overlay::centered_rect;
use crate::theme::{palette, styles};

const PANEL_WIDTH: u16 = 52;
const PANEL_HEIGHT: u16 = 12;

pub struct OtpPanel<'a> {
    otp: &'a OtpState,
    localizer: &'a Localizer,
    test_mode: bool,
    autofill_supported: bool,
    now: Instant,
}

impl<'a> OtpPanel<'a> {
    pub fn new(otp: &'a OtpState, localizer: &'a Localizer) -> Self {
        Self {
            otp,
            localizer,
            test_mode: false,
            autofill_supported: false,
            now: Instant::now(),
        }
    }

    pub fn test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    pub fn autofill(mut self, supported: bool) -> Self {
        self.autofill_supported = supported;
        self
    }

    /// Clock used for the resend countdown
    pub fn at(mut self, now: Instant) -> Self {
        self.now = now;
        self
    }

    /// Input box: typed digits followed by placeholders
    fn input_line(&self) -> Line<'static> {
        let (value, cap) = match self.otp.step {
            OtpStep::PhoneEntry => (&self.otp.phone, PHONE_LEN),
            _ => (&self.otp.code, CODE_LEN),
        };
        let placeholder = "_".repeat(cap.saturating_sub(value.len()));
        let style = if self.otp.loading {
            styles::text_muted()
        } else {
            styles::focused_selected()
        };
        Line::from(vec![
            Span::styled(format!(" {value}"), style),
            Span::styled(format!("{placeholder} "), style),
        ])
    }

    fn action_line(&self) -> Line<'static> {
        let t = |key| self.localizer.translate(key);
        if self.otp.loading {
            let key = match self.otp.step {
                OtpStep::PhoneEntry => "sending",
                _ => "verifying",
            };
            return Line::from(Span::styled(t(key), styles::status_yellow()));
        }
        let key = match self.otp.step {
            OtpStep::PhoneEntry => "send_code",
            _ => "verify_code",
        };
        Line::from(vec![
            Span::styled("Enter ", styles::keybinding()),
            Span::styled(t(key), styles::accent_bold()),
        ])
    }

    /// Resend and change-number hints during code entry
    fn code_entry_hints(&self) -> Line<'static> {
        let t = |key| self.localizer.translate(key);
        let mut spans = Vec::new();
        if !self.test_mode {
            match self.otp.resend_wait_secs(self.now) {
                Some(seconds) => spans.push(Span::styled(
                    self.localizer
                        .translate_with("resend_wait", &[("seconds", &seconds.to_string())]),
                    styles::text_muted(),
                )),
                None => {
                    spans.push(Span::styled("^R ", styles::keybinding()));
                    spans.push(Span::styled(t("resend_code"), styles::text_secondary()));
                }
            }
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled("Esc ", styles::keybinding()));
        spans.push(Span::styled(t("change_number"), styles::text_secondary()));
        Line::from(spans)
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let t = |key| self.localizer.translate(key);
        let prompt = match self.otp.step {
            OtpStep::PhoneEntry => t("enter_phone"),
            _ => t("enter_otp"),
        };

        let mut lines = vec![
            Line::from(Span::styled(prompt, styles::text_primary())),
            Line::default(),
            self.input_line(),
            Line::default(),
            self.action_line(),
        ];

        if self.otp.step == OtpStep::CodeEntry {
            lines.push(self.code_entry_hints());
            if self.autofill_supported && !self.test_mode {
                lines.push(Line::from(Span::styled(
                    t("auto_fill_note"),
                    styles::text_muted(),
                )));
            }
        }

        if let Some(key) = self.otp.error {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(t(key), styles::status_red())));
        }
        lines
    }
}

impl Widget for OtpPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let panel = centered_rect(PANEL_WIDTH, PANEL_HEIGHT, area);
        Clear.render(panel, buf);

        let title = format!(" {} ", self.localizer.translate("phone_verification"));
        let block = styles::glass_block(true)
            .title(title)
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(panel);
        block.render(panel, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        Paragraph::new(self.lines())
            .alignment(styles::alignment(self.localizer.is_rtl()))
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use devportal_core::Language;
    use std::time::Duration;

    #[test]
    fn test_phone_entry_renders_prompt_and_input() {
        let mut term = TestTerminal::new();
        let mut otp = OtpState::new();
        otp.phone = "05012".into();
        let localizer = Localizer::default();

        term.render_widget(OtpPanel::new(&otp, &localizer), term.area());

        assert!(term.buffer_contains("Phone Number Verification"));
        assert!(term.buffer_contains("Enter phone number"));
        assert!(term.buffer_contains("05012_____"));
        assert!(term.buffer_contains("Send Code"));
    }

    #[test]
    fn test_error_is_shown() {
        let mut term = TestTerminal::new();
        let mut otp = OtpState::new();
        otp.set_error("invalid_phone");
        let localizer = Localizer::default();

        term.render_widget(OtpPanel::new(&otp, &localizer), term.area());

        assert!(term.buffer_contains("Please enter a valid phone number"));
    }

    #[test]
    fn test_code_entry_shows_countdown_and_autofill_note() {
        let mut term = TestTerminal::new();
        let now = Instant::now();
        let mut otp = OtpState::new();
        otp.phone = "0501234567".into();
        otp.enter_code_entry(now, Duration::from_secs(5));
        let localizer = Localizer::default();

        term.render_widget(
            OtpPanel::new(&otp, &localizer).autofill(true).at(now),
            term.area(),
        );

        assert!(term.buffer_contains("Enter verification code"));
        assert!(term.buffer_contains("Resend available in 5s"));
        assert!(term.buffer_contains("Change number"));
        assert!(term.buffer_contains("auto-fill"));
    }

    #[test]
    fn test_resend_offered_after_cooldown() {
        let mut term = TestTerminal::new();
        let now = Instant::now();
        let mut otp = OtpState::new();
        otp.enter_code_entry(now, Duration::from_secs(5));
        let localizer = Localizer::default();

        term.render_widget(
            OtpPanel::new(&otp, &localizer).at(now + Duration::from_secs(6)),
            term.area(),
        );

        assert!(term.buffer_contains("Resend code"));
    }

    #[test]
    fn test_loading_replaces_action() {
        let mut term = TestTerminal::new();
        let mut otp = OtpState::new();
        otp.loading = true;
        let localizer = Localizer::default();

        term.render_widget(OtpPanel::new(&otp, &localizer), term.area());

        assert!(term.buffer_contains("Sending..."));
        assert!(!term.buffer_contains("Send Code"));
    }

    #[test]
    fn test_hebrew_prompt() {
        let mut term = TestTerminal::new();
        let otp = OtpState::new();
        let localizer = Localizer::new(Language::Hebrew);

        term.render_widget(OtpPanel::new(&otp, &localizer), term.area());

        assert!(term.buffer_contains("הזן מספר טלפון"));
    }
}
