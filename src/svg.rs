use crate::avatar::Avatar;
use crate::rank::Rank;
use crate::stats::Stats;
use crate::theme::Theme;

const WIDTH: i32 = 640;
const HEIGHT: i32 = 320;

const FONT_STACK: &str = "'Space Grotesk', 'Segoe UI', sans-serif";

const METRIC_COUNT: usize = 5;
const TILE_TOP: i32 = 146;
const TILE_STEP: i32 = 54;
const TILE_HEIGHT: i32 = 44;

// Utilities for building SVG content

/// Escape the five reserved markup characters. Applied to every
/// interpolated string, including the accessibility label.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Group digits with commas: 1480 -> "1,480".
fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Tile placement is a pure function of the index: two columns, the last
/// tile spanning the full row.
fn tile_geometry(index: usize) -> (i32, i32, i32) {
    let row = (index / 2) as i32;
    let y = TILE_TOP + row * TILE_STEP;
    if index == METRIC_COUNT - 1 {
        (24, y, 592)
    } else if index % 2 == 0 {
        (24, y, 280)
    } else {
        (336, y, 280)
    }
}

fn metric_rows(stats: &Stats) -> [(&'static str, String); METRIC_COUNT] {
    [
        ("Total Stars Earned", format_number(stats.total_stars)),
        ("Total Commits (last year)", format_number(stats.commits)),
        ("Total PRs", format_number(stats.prs)),
        ("Total Issues", format_number(stats.issues)),
        ("Contributed to (last year)", format_number(stats.contributed)),
    ]
}

/// Main card. Deterministic for identical inputs: same stats, rank, avatar
/// and theme always produce the same bytes.
pub fn render_card(stats: &Stats, rank: &Rank, avatar: &Avatar, theme: Theme) -> String {
    let colors = theme.colors();
    let grade_fill = theme.grade_color(rank.grade);
    let grade_label = rank.grade.label();
    let percentile = format!("{:.1}", rank.percentile);

    let subtitle = format!("@{} · {} repos", stats.login, stats.total_repos);
    let subtitle2 = format!(
        "Last year: {} · Joined {}",
        stats.period_label, stats.joined
    );

    let metrics = metric_rows(stats);

    let mut metric_blocks = String::new();
    for (index, (label, value)) in metrics.iter().enumerate() {
        let (x, y, width) = tile_geometry(index);
        metric_blocks.push_str(&format!(
            r#"  <g transform="translate({x} {y})">
    <rect width="{width}" height="{TILE_HEIGHT}" rx="14" fill="{tile_fill}" stroke="{tile_stroke}" />
    <text class="label" x="16" y="18">{label}</text>
    <text class="value" x="16" y="34">{value}</text>
  </g>
"#,
            tile_fill = colors.tile_fill,
            tile_stroke = colors.tile_stroke,
            label = escape_xml(label),
            value = escape_xml(value),
        ));
    }

    let aria = format!(
        "{} GitHub stats card. {}. Grade {}.",
        stats.name,
        metrics
            .iter()
            .map(|(label, value)| format!("{label} {value}"))
            .collect::<Vec<_>>()
            .join(", "),
        grade_label
    );

    let avatar_image = match avatar.href() {
        Some(href) => format!(
            r#"    <image href="{}" x="24" y="28" width="72" height="72" clip-path="url(#avatarClip)" />
"#,
            escape_xml(href)
        ),
        None => String::new(),
    };

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="{aria}">
  <defs>
    <linearGradient id="bg" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="{bg_start}" />
      <stop offset="100%" stop-color="{bg_end}" />
    </linearGradient>
    <linearGradient id="accent" x1="0" y1="0" x2="1" y2="0">
      <stop offset="0%" stop-color="{accent_start}" />
      <stop offset="100%" stop-color="{accent_end}" />
    </linearGradient>
    <clipPath id="avatarClip">
      <circle cx="60" cy="64" r="36" />
    </clipPath>
    <filter id="softGlow" x="-20%" y="-20%" width="140%" height="140%">
      <feGaussianBlur stdDeviation="8" result="blur" />
      <feColorMatrix type="matrix" values="{glow_matrix}" />
      <feBlend in="SourceGraphic" in2="blur" mode="screen" />
    </filter>
    <style>
      .title {{ font: 600 22px {font}; fill: {title}; }}
      .subtitle {{ font: 400 13px {font}; fill: {subtitle_color}; }}
      .label {{ font: 500 11px {font}; fill: {label}; letter-spacing: 0.4px; text-transform: uppercase; }}
      .value {{ font: 600 16px {font}; fill: {value}; }}
      .grade {{ font: 700 22px {font}; fill: {grade_text}; }}
      .score {{ font: 500 11px {font}; fill: {score_text}; text-transform: uppercase; letter-spacing: 1px; }}
    </style>
  </defs>

  <rect width="{WIDTH}" height="{HEIGHT}" rx="28" fill="url(#bg)" />
  <rect x="18" y="18" width="604" height="284" rx="22" fill="{panel_fill}" stroke="{panel_stroke}" />

  <circle cx="540" cy="80" r="70" fill="url(#accent)" opacity="{glow_opacity}" filter="url(#softGlow)" />
  <circle cx="560" cy="260" r="90" fill="{orb_fill}" opacity="{orb_opacity}" />

  <g>
    <g clip-path="url(#avatarClip)">
      <circle cx="60" cy="64" r="36" fill="{placeholder_fill}" />
      <circle cx="60" cy="54" r="13" fill="{placeholder_icon}" />
      <path d="M36 94c2-16 11-24 24-24s22 8 24 24" fill="{placeholder_icon}" />
    </g>
{avatar_image}    <text class="title" x="112" y="56">{name}</text>
    <text class="subtitle" x="112" y="78">{subtitle}</text>
    <text class="subtitle" x="112" y="96">{subtitle2}</text>
  </g>

  <g transform="translate(468 36)">
    <rect width="148" height="72" rx="18" fill="{grade_fill}" />
    <text class="grade" x="18" y="40">{grade_label}</text>
    <text class="score" x="18" y="58">Percentile {percentile}</text>
  </g>

{metric_blocks}</svg>
"#,
        aria = escape_xml(&aria),
        bg_start = colors.bg_start,
        bg_end = colors.bg_end,
        accent_start = colors.accent_start,
        accent_end = colors.accent_end,
        glow_matrix = colors.glow_matrix,
        font = FONT_STACK,
        title = colors.title,
        subtitle_color = colors.subtitle,
        label = colors.label,
        value = colors.value,
        grade_text = colors.grade_text,
        score_text = colors.score_text,
        panel_fill = colors.panel_fill,
        panel_stroke = colors.panel_stroke,
        glow_opacity = colors.glow_opacity,
        orb_fill = colors.orb_fill,
        orb_opacity = colors.orb_opacity,
        placeholder_fill = colors.placeholder_fill,
        placeholder_icon = colors.placeholder_icon,
        name = escape_xml(&stats.name),
        subtitle = escape_xml(&subtitle),
        subtitle2 = escape_xml(&subtitle2),
        grade_label = escape_xml(grade_label),
        percentile = escape_xml(&percentile),
    )
}

/// Usage card shown when no username is given.
pub fn render_info(theme: Theme) -> String {
    let colors = theme.colors();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="GitHub card usage">
  <defs>
    <linearGradient id="bg" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="{bg_start}" />
      <stop offset="100%" stop-color="{bg_end}" />
    </linearGradient>
  </defs>
  <rect width="{WIDTH}" height="{HEIGHT}" rx="28" fill="url(#bg)" />
  <rect x="18" y="18" width="604" height="284" rx="22" fill="{panel_fill}" stroke="{panel_stroke}" />
  <text x="32" y="70" font-family="{font}" font-size="22" fill="{title}">GitHub Card</text>
  <text x="32" y="110" font-family="{font}" font-size="14" fill="{subtitle}">Usage: https://your-domain.com/username</text>
  <text x="32" y="140" font-family="{font}" font-size="14" fill="{subtitle}">Set GITHUB_TOKEN to enable GitHub API access.</text>
</svg>
"#,
        bg_start = colors.bg_start,
        bg_end = colors.bg_end,
        panel_fill = colors.panel_fill,
        panel_stroke = colors.panel_stroke,
        font = FONT_STACK,
        title = colors.title,
        subtitle = colors.subtitle,
    )
}

/// Error card carrying a plain-text message.
pub fn render_error(message: &str, theme: Theme) -> String {
    let colors = theme.colors();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="GitHub card error">
  <defs>
    <linearGradient id="bg" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="{bg_start}" />
      <stop offset="100%" stop-color="{bg_end}" />
    </linearGradient>
  </defs>
  <rect width="{WIDTH}" height="{HEIGHT}" rx="28" fill="url(#bg)" />
  <rect x="18" y="18" width="604" height="284" rx="22" fill="{panel_fill}" stroke="{panel_stroke}" />
  <text x="32" y="70" font-family="{font}" font-size="20" fill="{title}">GitHub Card Error</text>
  <text x="32" y="110" font-family="{font}" font-size="14" fill="{message_color}">{message}</text>
</svg>
"#,
        bg_start = colors.bg_start,
        bg_end = colors.bg_end,
        panel_fill = colors.panel_fill,
        panel_stroke = colors.panel_stroke,
        font = FONT_STACK,
        title = colors.title,
        message_color = colors.message,
        message = escape_xml(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::calculate_rank;
    use crate::stats::demo_stats;

    fn demo_card(theme: Theme) -> String {
        let stats = demo_stats("demo");
        let rank = calculate_rank(&stats);
        let avatar = Avatar::Remote(stats.avatar_url.clone());
        render_card(&stats, &rank, &avatar, theme)
    }

    #[test]
    fn groups_digits_with_commas() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1480), "1,480");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn fifth_tile_spans_full_width() {
        assert_eq!(tile_geometry(0), (24, 146, 280));
        assert_eq!(tile_geometry(1), (336, 146, 280));
        assert_eq!(tile_geometry(2), (24, 200, 280));
        assert_eq!(tile_geometry(3), (336, 200, 280));
        assert_eq!(tile_geometry(4), (24, 254, 592));
    }

    #[test]
    fn card_has_fixed_canvas_and_metrics() {
        let svg = demo_card(Theme::Dark);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 640 320""#));
        assert!(svg.contains("Total Stars Earned"));
        assert!(svg.contains("Contributed to (last year)"));
        assert!(svg.contains("1,480"));
        assert!(svg.contains("Percentile "));
    }

    #[test]
    fn variable_text_is_escaped_everywhere() {
        let mut stats = demo_stats("demo");
        stats.name = r#"Mallory <&> "O'Brien""#.to_string();
        let rank = calculate_rank(&stats);
        let svg = render_card(&stats, &rank, &Avatar::Missing, Theme::Dark);

        assert!(svg.contains("Mallory &lt;&amp;&gt; &quot;O&#39;Brien&quot;"));
        assert!(!svg.contains(r#"Mallory <&>"#));
        // The accessibility label carries the same escaped text.
        let aria = svg
            .split("aria-label=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap();
        assert!(aria.contains("Mallory &lt;&amp;&gt;"));
    }

    #[test]
    fn missing_avatar_still_renders_with_placeholder() {
        let stats = demo_stats("demo");
        let rank = calculate_rank(&stats);
        let svg = render_card(&stats, &rank, &Avatar::Missing, Theme::Dark);
        assert!(!svg.contains("<image"));
        assert!(svg.contains(r#"clip-path="url(#avatarClip)""#));
        assert!(svg.starts_with("<?xml"));
    }

    #[test]
    fn present_avatar_is_drawn_over_the_placeholder() {
        let svg = demo_card(Theme::Dark);
        assert!(svg.contains("<image href="));
        let placeholder = svg.find(r#"<circle cx="60" cy="64" r="36""#).unwrap();
        let image = svg.find("<image href=").unwrap();
        assert!(placeholder < image);
    }

    #[test]
    fn unknown_theme_renders_identically_to_dark() {
        assert_eq!(demo_card(Theme::parse("neon")), demo_card(Theme::Dark));
        assert_ne!(demo_card(Theme::Light), demo_card(Theme::Dark));
    }

    #[test]
    fn error_card_escapes_the_message() {
        let svg = render_error(r#"boom <script>"&"#, Theme::Matrix);
        assert!(svg.contains("boom &lt;script&gt;&quot;&amp;"));
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("GitHub Card Error"));
    }

    #[test]
    fn info_card_is_themed() {
        let dark = render_info(Theme::Dark);
        let light = render_info(Theme::Light);
        assert!(dark.contains("GitHub Card"));
        assert!(dark.contains("GITHUB_TOKEN"));
        assert_ne!(dark, light);
    }
}
