//! Built-in Typst report template with `{{PLACEHOLDER}}` markers.

const TEMPLATE: &str = r##"#set page(paper: "a4", margin: (x: 1.8cm, y: 2cm))
#set text(font: "New Computer Modern", size: 10pt)
#set table(stroke: 0.5pt + rgb("#bbbbbb"), inset: 6pt)

#align(center)[
  #text(size: 20pt, weight: "bold")[Relative Rotation Report]
  #v(0.2em)
  #text(fill: gray)[Sector rotation against the benchmark]
]

= Settings

{{SETTINGS_SUMMARY}}

= Market Rotation Snapshot

{{QUADRANT_SNAPSHOT}}

= Relative Rotation Graph

{{RRG_CHART_SVG}}

= Sector Ranking

Sorted by quadrant (Leading, Improving, Weakening, Lagging), then by RS-Ratio.
Bold rows carry a daily entry signal.

{{RANKING_TABLE}}

= Rotation Tails

{{TAIL_TABLE}}

{{SKIPPED_SECTORS}}
"##;

pub fn template() -> &'static str {
    TEMPLATE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_every_placeholder() {
        for placeholder in [
            "{{SETTINGS_SUMMARY}}",
            "{{QUADRANT_SNAPSHOT}}",
            "{{RRG_CHART_SVG}}",
            "{{RANKING_TABLE}}",
            "{{TAIL_TABLE}}",
            "{{SKIPPED_SECTORS}}",
        ] {
            assert!(template().contains(placeholder), "missing {placeholder}");
        }
    }

    #[test]
    fn template_sets_up_page() {
        assert!(template().starts_with("#set page("));
    }

    #[test]
    fn template_keeps_hex_colours_intact() {
        assert!(template().contains(r##"stroke: 0.5pt + rgb("#bbbbbb"), inset: 6pt)"##));
        assert!(template().trim_end().ends_with("{{SKIPPED_SECTORS}}"));
    }
}
