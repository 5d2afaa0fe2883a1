use crate::rank::Grade;

/// Visual palettes for the rendered card. Unknown identifiers fall back to
/// `Dark`, so theme selection is total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
    Matrix,
}

/// Named visual tokens consumed by the SVG renderer. Adding a theme means
/// adding one complete record here; the renderer does not change.
pub struct ThemeColors {
    // canvas
    pub bg_start: &'static str,
    pub bg_end: &'static str,
    pub panel_fill: &'static str,
    pub panel_stroke: &'static str,
    // accent glow
    pub accent_start: &'static str,
    pub accent_end: &'static str,
    pub glow_matrix: &'static str,
    pub glow_opacity: &'static str,
    pub orb_fill: &'static str,
    pub orb_opacity: &'static str,
    // text
    pub title: &'static str,
    pub subtitle: &'static str,
    pub label: &'static str,
    pub value: &'static str,
    // metric tiles
    pub tile_fill: &'static str,
    pub tile_stroke: &'static str,
    // grade badge
    pub grade_text: &'static str,
    pub score_text: &'static str,
    // avatar placeholder
    pub placeholder_fill: &'static str,
    pub placeholder_icon: &'static str,
    // info/error body text
    pub message: &'static str,
}

impl Theme {
    /// Map a request-supplied identifier to a palette. Case-insensitive;
    /// anything unrecognized is `Dark`.
    pub fn parse(value: &str) -> Theme {
        match value.to_ascii_lowercase().as_str() {
            "light" => Theme::Light,
            "matrix" => Theme::Matrix,
            _ => Theme::Dark,
        }
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg_start: "#0f172a",
                bg_end: "#1f2937",
                panel_fill: "rgba(15,23,42,0.45)",
                panel_stroke: "rgba(148,163,184,0.15)",
                accent_start: "#38bdf8",
                accent_end: "#f59e0b",
                glow_matrix: "0 0 0 0 0.4  0 0 0 0 0.7  0 0 0 0 1  0 0 0 0.3 0",
                glow_opacity: "0.14",
                orb_fill: "#f97316",
                orb_opacity: "0.08",
                title: "#f8fafc",
                subtitle: "#94a3b8",
                label: "#cbd5f5",
                value: "#f1f5f9",
                tile_fill: "rgba(255,255,255,0.08)",
                tile_stroke: "rgba(255,255,255,0.06)",
                grade_text: "#0f172a",
                score_text: "#0f172a",
                placeholder_fill: "rgba(148,163,184,0.25)",
                placeholder_icon: "#94a3b8",
                message: "#fca5a5",
            },
            Theme::Light => ThemeColors {
                bg_start: "#f8fafc",
                bg_end: "#e2e8f0",
                panel_fill: "rgba(255,255,255,0.65)",
                panel_stroke: "rgba(100,116,139,0.2)",
                accent_start: "#0ea5e9",
                accent_end: "#f59e0b",
                glow_matrix: "0 0 0 0 0.1  0 0 0 0 0.4  0 0 0 0 0.8  0 0 0 0.25 0",
                glow_opacity: "0.18",
                orb_fill: "#fb923c",
                orb_opacity: "0.1",
                title: "#0f172a",
                subtitle: "#475569",
                label: "#334155",
                value: "#1e293b",
                tile_fill: "rgba(15,23,42,0.05)",
                tile_stroke: "rgba(15,23,42,0.08)",
                grade_text: "#0f172a",
                score_text: "#1e293b",
                placeholder_fill: "rgba(100,116,139,0.2)",
                placeholder_icon: "#64748b",
                message: "#b91c1c",
            },
            Theme::Matrix => ThemeColors {
                bg_start: "#010b01",
                bg_end: "#031703",
                panel_fill: "rgba(0,20,0,0.55)",
                panel_stroke: "rgba(0,255,65,0.18)",
                accent_start: "#00ff41",
                accent_end: "#008f11",
                glow_matrix: "0 0 0 0 0  0 0 0 0 1  0 0 0 0 0.25  0 0 0 0.35 0",
                glow_opacity: "0.2",
                orb_fill: "#00ff41",
                orb_opacity: "0.05",
                title: "#00ff41",
                subtitle: "#008f11",
                label: "#00c936",
                value: "#d4ffd4",
                tile_fill: "rgba(0,255,65,0.06)",
                tile_stroke: "rgba(0,255,65,0.12)",
                grade_text: "#001a00",
                score_text: "#002b00",
                placeholder_fill: "rgba(0,255,65,0.15)",
                placeholder_icon: "#00c936",
                message: "#ff6b6b",
            },
        }
    }

    /// Badge fill for a grade under this palette.
    pub fn grade_color(self, grade: Grade) -> &'static str {
        match self {
            Theme::Dark => match grade {
                Grade::S => "#fde68a",
                Grade::APlus => "#bae6fd",
                Grade::A => "#93c5fd",
                Grade::AMinus => "#a7f3d0",
                Grade::BPlus => "#86efac",
                Grade::B => "#bbf7d0",
                Grade::BMinus => "#fef08a",
                Grade::CPlus => "#fecaca",
                Grade::C => "#e2e8f0",
            },
            Theme::Light => match grade {
                Grade::S => "#f59e0b",
                Grade::APlus => "#38bdf8",
                Grade::A => "#60a5fa",
                Grade::AMinus => "#34d399",
                Grade::BPlus => "#4ade80",
                Grade::B => "#86efac",
                Grade::BMinus => "#facc15",
                Grade::CPlus => "#f87171",
                Grade::C => "#94a3b8",
            },
            Theme::Matrix => match grade {
                Grade::S => "#00ff41",
                Grade::APlus => "#2bff70",
                Grade::A => "#50fa7b",
                Grade::AMinus => "#69ff94",
                Grade::BPlus => "#85ffa8",
                Grade::B => "#9dffbb",
                Grade::BMinus => "#b5ffce",
                Grade::CPlus => "#ccffdd",
                Grade::C => "#e0ffe9",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_themes() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("matrix"), Theme::Matrix);
        assert_eq!(Theme::parse("MATRIX"), Theme::Matrix);
    }

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        assert_eq!(Theme::parse("neon"), Theme::Dark);
        assert_eq!(Theme::parse(""), Theme::Dark);
    }

    #[test]
    fn grade_colors_differ_per_theme() {
        assert_ne!(
            Theme::Dark.grade_color(Grade::S),
            Theme::Light.grade_color(Grade::S)
        );
        assert_ne!(
            Theme::Dark.grade_color(Grade::S),
            Theme::Matrix.grade_color(Grade::S)
        );
    }
}
