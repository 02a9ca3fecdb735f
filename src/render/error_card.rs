use super::format::escape_xml;

/// Fixed-size card shown in place of a stats card when a request fails
pub fn render_error_card(message: &str) -> String {
    format!(
        concat!(
            r##"<svg width="600" height="120" viewBox="0 0 600 120" xmlns="http://www.w3.org/2000/svg" style="background-color: #0d1117;">"##,
            "\n<defs>\n<style>\n",
            ".error-title {{ font: 600 16px 'Segoe UI', Ubuntu, Sans-Serif; fill: #f85149; }}\n",
            ".error-message {{ font: 400 12px 'Segoe UI', Ubuntu, Sans-Serif; fill: #e6edf3; }}\n",
            "</style>\n</defs>\n",
            r##"<rect x="10" y="10" width="580" height="100" fill="#21262d" stroke="#f85149" stroke-width="2" rx="6"/>"##,
            "\n",
            r##"<text x="300" y="35" text-anchor="middle" class="error-title">GitHub PR Stats Error</text>"##,
            "\n",
            r##"<text x="300" y="65" text-anchor="middle" class="error-message">{}</text>"##,
            "\n</svg>\n"
        ),
        escape_xml(message)
    )
}
