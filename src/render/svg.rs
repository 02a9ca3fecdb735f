use super::fields::{parse_fields, Cell, FieldConfig, TableRow};
use super::format::escape_xml;
use super::icons::{status_icon, ICON_SIZE};
use super::layout::{
    compute_layout, CardLayout, StatsPanel, LEFT_MARGIN, STATS_ROW_HEIGHT, STAT_SEPARATOR,
};
use super::theme::Theme;
use crate::params::CardParams;
use crate::processing::{parse_stats, ProcessedData, SummaryStats, TableView};

/// Height of the drawn header and body rectangles
const CELL_HEIGHT: u32 = 35;
/// Text baseline offset inside a row
const TEXT_BASELINE: u32 = 22;
/// Title baseline offset inside the title band
const TITLE_BASELINE: u32 = 25;

/// Lay out and render a card for processed data.
///
/// The column catalog follows the shape of `data.view`, so fields always
/// match the rows being drawn.
pub fn render_card(data: &ProcessedData, params: &CardParams) -> String {
    let fields = parse_fields(&params.fields, data.view.mode());
    let selected_stats = parse_stats(&params.stats);
    let layout = compute_layout(fields, &selected_stats, &data.stats, data.view.len());

    tracing::debug!(
        width = layout.width,
        height = layout.height,
        columns = layout.fields.len(),
        rows = layout.row_count,
        "Computed card layout"
    );

    render_document(
        &params.username,
        data,
        Theme::for_name(params.theme),
        &layout,
    )
}

/// Emit the SVG for an already computed layout
pub fn render_document(
    username: &str,
    data: &ProcessedData,
    theme: &Theme,
    layout: &CardLayout,
) -> String {
    let mut svg = render_header(layout.width, layout.height, theme);
    svg.push_str(&render_title(username, layout));

    if let Some(panel) = &layout.stats {
        svg.push_str(&render_stats(panel, &data.stats, layout, theme));
    }

    svg.push_str(&render_table_header(layout, theme));
    match &data.view {
        TableView::PrList(rows) => svg.push_str(&render_table_body(rows, layout, theme)),
        TableView::RepoAggregate(rows) => svg.push_str(&render_table_body(rows, layout, theme)),
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_header(width: u32, height: u32, theme: &Theme) -> String {
    format!(
        concat!(
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" style="background-color: {bg};">"#,
            "\n<defs>\n<style>\n",
            ".title {{ font: 600 18px 'Segoe UI', Ubuntu, Sans-Serif; fill: {title}; }}\n",
            ".stats {{ font: 600 14px 'Segoe UI', Ubuntu, Sans-Serif; fill: {stats}; }}\n",
            ".header {{ font: 600 12px 'Segoe UI', Ubuntu, Sans-Serif; fill: {header}; }}\n",
            ".text {{ font: 400 12px 'Segoe UI', Ubuntu, Sans-Serif; fill: {text}; }}\n",
            "</style>\n</defs>\n"
        ),
        w = width,
        h = height,
        bg = theme.background,
        title = theme.title_color,
        stats = theme.stats_color,
        header = theme.header_color,
        text = theme.text_color,
    )
}

fn render_title(username: &str, layout: &CardLayout) -> String {
    format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" class=\"title\">GitHub PR Contributions - {}</text>\n",
        f64::from(layout.width) / 2.0,
        layout.title_y + TITLE_BASELINE,
        escape_xml(username)
    )
}

fn render_stats(
    panel: &StatsPanel,
    stats: &SummaryStats,
    layout: &CardLayout,
    theme: &Theme,
) -> String {
    // Inset from the canvas edges like the table
    let rect_width = panel
        .width
        .min(layout.width.saturating_sub(2 * LEFT_MARGIN));
    let rect_x = f64::from(layout.width - rect_width) / 2.0;
    let center_x = f64::from(layout.width) / 2.0;
    let center_y = f64::from(layout.stats_y) + f64::from(panel.height) / 2.0;

    let mut svg = format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"{}\" rx=\"6\"/>\n",
        rect_x, layout.stats_y, rect_width, panel.height, theme.stats_bg, theme.border_color
    );
    svg.push_str("<g text-anchor=\"middle\" dominant-baseline=\"central\">\n");

    // Rows are spaced evenly around the panel's vertical center
    let spread = (panel.rows.len() as f64 - 1.0) * f64::from(STATS_ROW_HEIGHT);
    for (index, row) in panel.rows.iter().enumerate() {
        let row_y = center_y - spread / 2.0 + index as f64 * f64::from(STATS_ROW_HEIGHT);

        let runs = row
            .iter()
            .map(|key| {
                let color = if key.is_merged() {
                    theme.merged_stats_color
                } else {
                    theme.stats_color
                };
                format!(
                    "<tspan fill=\"{}\">{}</tspan>",
                    color,
                    escape_xml(&key.text(stats))
                )
            })
            .collect::<Vec<_>>()
            .join(&format!(
                "<tspan fill=\"{}\">{}</tspan>",
                theme.stats_color, STAT_SEPARATOR
            ));

        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" class=\"stats\" xml:space=\"preserve\">{}</text>\n",
            center_x, row_y, runs
        ));
    }

    svg.push_str("</g>\n");
    svg
}

/// Left edge of each column, paired with its field and whether it is the last
fn columns(layout: &CardLayout) -> impl Iterator<Item = (f64, &'static FieldConfig, bool)> + '_ {
    let last = layout.fields.len().saturating_sub(1);
    layout
        .fields
        .iter()
        .enumerate()
        .scan(layout.table_x, move |x, (index, field)| {
            let left = *x;
            *x += f64::from(field.width);
            Some((left, *field, index == last))
        })
}

fn render_divider(x: f64, y: u32, theme: &Theme) -> String {
    format!(
        "<line x1=\"{x}\" y1=\"{y}\" x2=\"{x}\" y2=\"{y2}\" stroke=\"{stroke}\"/>\n",
        x = x,
        y = y,
        y2 = y + CELL_HEIGHT,
        stroke = theme.border_color
    )
}

fn render_row_rect(layout: &CardLayout, y: u32, fill: &str, theme: &Theme) -> String {
    format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"{}\"/>\n",
        layout.table_x,
        y,
        layout.columns_width(),
        CELL_HEIGHT,
        fill,
        theme.border_color
    )
}

fn render_table_header(layout: &CardLayout, theme: &Theme) -> String {
    let y = layout.header_y;
    let mut svg = render_row_rect(layout, y, theme.header_bg, theme);

    for (x, field, is_last) in columns(layout) {
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" class=\"header\" text-anchor=\"{}\">{}</text>\n",
            field.align.text_x(x, field.width),
            y + TEXT_BASELINE,
            field.align.anchor(),
            escape_xml(field.label)
        ));
        if !is_last {
            svg.push_str(&render_divider(x + f64::from(field.width), y, theme));
        }
    }
    svg
}

fn render_table_body<R: TableRow>(rows: &[R], layout: &CardLayout, theme: &Theme) -> String {
    let mut svg = String::new();

    for (index, row) in rows.iter().enumerate() {
        let y = layout.row_y(index);
        svg.push_str(&render_row_rect(layout, y, theme.row_bg(index), theme));

        for (x, field, is_last) in columns(layout) {
            let text_x = field.align.text_x(x, field.width);
            match row.cell(field) {
                Cell::Status(status) => svg.push_str(&format!(
                    "<g transform=\"translate({}, {})\">{}</g>\n",
                    text_x - f64::from(ICON_SIZE) / 2.0,
                    y + (CELL_HEIGHT - ICON_SIZE) / 2 + 1,
                    status_icon(status)
                )),
                Cell::Text(text) => svg.push_str(&format!(
                    "<text x=\"{}\" y=\"{}\" class=\"text\" text-anchor=\"{}\">{}</text>\n",
                    text_x,
                    y + TEXT_BASELINE,
                    field.align.anchor(),
                    escape_xml(&text)
                )),
            }
            if !is_last {
                svg.push_str(&render_divider(x + f64::from(field.width), y, theme));
            }
        }
    }
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::RawPrState;
    use crate::params::RawParams;
    use crate::processing::normalize::tests::raw_pr;
    use crate::processing::process;

    fn params(raw: RawParams) -> CardParams {
        CardParams::resolve(RawParams {
            username: Some("alice".to_string()),
            ..raw
        })
        .unwrap()
    }

    fn render(raw: RawParams) -> String {
        let params = params(raw);
        let prs = vec![
            raw_pr("x", "y", 50, 1, RawPrState::Merged, false),
            raw_pr("x", "y", 50, 2, RawPrState::Open, false),
            raw_pr("p", "q", 5, 3, RawPrState::Merged, false),
        ];
        let data = process(&prs, &params).unwrap();
        render_card(&data, &params)
    }

    #[test]
    fn test_document_structure() {
        let svg = render(RawParams::default());

        assert!(svg.starts_with(
            r#"<svg width="890" height="290" viewBox="0 0 890 290" xmlns="http://www.w3.org/2000/svg" style="background-color: #0d1117;">"#
        ));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("GitHub PR Contributions - alice"));
        assert!(svg.contains(".title { font: 600 18px"));
        // One header and three body rows
        assert_eq!(svg.matches("class=\"header\"").count(), 7);
        assert_eq!(svg.matches("<rect ").count(), 1 + 1 + 3);
        // Six dividers per row, none after the last column
        assert_eq!(svg.matches("<line ").count(), 4 * 6);
    }

    #[test]
    fn test_stats_panel_runs() {
        let svg = render(RawParams::default());

        assert!(svg.contains(r##"<tspan fill="#f0f6fc">Total PRs: 3</tspan>"##));
        assert!(svg.contains(r#"<tspan fill="rgba(180, 120, 255, 1)">Merged PRs: 2</tspan>"#));
        assert!(svg.contains(r##"<tspan fill="#f0f6fc">   |   </tspan>"##));
        assert!(svg.contains(r#"<rect x="20" y="70" width="850" height="45""#));
    }

    #[test]
    fn test_no_stats_panel() {
        let svg = render(RawParams {
            stats: Some("none".to_string()),
            ..RawParams::default()
        });
        assert!(!svg.contains("class=\"stats\""));
        // 50 + 40 + 3 * 35 + 40
        assert!(svg.contains(r#"height="235""#));
        assert!(svg.contains(r#"<rect x="20" y="70" width="850" height="35""#));
    }

    #[test]
    fn test_status_glyphs_replace_text() {
        let svg = render(RawParams::default());
        assert_eq!(svg.matches("<g transform=\"translate(").count(), 3);
        assert!(!svg.contains(">merged</text>"));
        assert!(svg.contains("#8957e5"));
    }

    #[test]
    fn test_alternating_row_backgrounds() {
        let svg = render(RawParams::default());
        let rows: Vec<&str> = svg
            .lines()
            .filter(|l| l.starts_with("<rect") && l.contains("height=\"35\""))
            .collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[1].contains("fill=\"#0d1117\""));
        assert!(rows[2].contains("fill=\"#161b22\""));
        assert!(rows[3].contains("fill=\"#0d1117\""));
    }

    #[test]
    fn test_light_theme() {
        let svg = render(RawParams {
            theme: Some("light".to_string()),
            ..RawParams::default()
        });
        assert!(svg.contains("background-color: #ffffff;"));
        assert!(svg.contains("rgba(130, 80, 223, 1)"));
    }

    #[test]
    fn test_aggregate_view_renders_counts() {
        let svg = render(RawParams {
            mode: Some("repo-aggregate".to_string()),
            ..RawParams::default()
        });
        assert!(svg.contains(">PRs Number</text>"));
        assert!(svg.contains(">#2, #1</text>"));
        assert!(svg.contains(">50%</text>"));
        assert!(svg.contains(">100%</text>"));
        assert!(!svg.contains("<g transform="));
    }

    #[test]
    fn test_narrow_table_is_centered() {
        let svg = render(RawParams {
            fields: Some("repo".to_string()),
            stats: Some("total_pr".to_string()),
            ..RawParams::default()
        });
        // canvas 400, table 240, so the columns start 80px further in
        assert!(svg.contains(r#"<svg width="400""#));
        assert!(svg.contains(r#"<rect x="100" y="125" width="200" height="35""#));
        assert_eq!(svg.matches("<line ").count(), 0);
    }

    #[test]
    fn test_output_is_deterministic() {
        assert_eq!(render(RawParams::default()), render(RawParams::default()));
    }
}
