use lazy_regex::regex_is_match;
use scraper::{ElementRef, Html};

use crate::{
    error::*,
    model::*,
    util::{self, DocExt as _, ElementRefExt as _},
};

/// Number of `div.content` blocks on a problem page.
pub const CONTENT_BLOCKS: usize = 6;

/// Number of cells in a submission status row.
pub const STATUS_COLUMNS: usize = 9;

/// Turns HTML fragments taken from the live page into records.
/// Implementations must be pure: no I/O, same input gives same output.
pub trait Extractor: Send + Sync {
    /// `table_html` is the outer HTML of the problem set table.
    fn problem_rows(&self, table_html: &str) -> Result<Vec<ProblemSummary>>;

    /// `container_html` is the outer HTML of the `.problem` container.
    fn problem_detail(&self, container_html: &str) -> Result<ProblemDetail>;

    /// `table_html` is the outer HTML of the status table.
    fn status_rows(&self, table_html: &str) -> Result<Vec<SubmissionStatus>>;
}

/// Markup rules of oj.noi.cn.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiExtractor;

impl Extractor for NoiExtractor {
    fn problem_rows(&self, table_html: &str) -> Result<Vec<ProblemSummary>> {
        let doc = Html::parse_fragment(table_html);
        let sel_tr = util::selector_must_parsed("tr[style]");
        doc.select(&sel_tr)
            .filter(|tr| tr.value().attr("style").map_or(false, is_zero_height))
            .map(parse_problem_row)
            .collect()
    }

    fn problem_detail(&self, container_html: &str) -> Result<ProblemDetail> {
        let doc = Html::parse_fragment(container_html);
        let sel = util::selector_must_parsed("div.content");

        // Positional: the site gives the six blocks no distinguishing markup,
        // so the order below is the whole contract.
        let mut blocks: Vec<String> = doc.select(&sel).map(|el| el.trimmed_text()).collect();
        let found = blocks.len();
        blocks.truncate(CONTENT_BLOCKS);
        let [content, input, output, sample_input, sample_output, limits]: [String; CONTENT_BLOCKS] =
            blocks.try_into().map_err(|_| Error::MissingContentBlocks {
                expected: CONTENT_BLOCKS,
                found,
            })?;

        Ok(ProblemDetail {
            content,
            input,
            output,
            sample_input,
            sample_output,
            limits,
        })
    }

    fn status_rows(&self, table_html: &str) -> Result<Vec<SubmissionStatus>> {
        let doc = Html::parse_fragment(table_html);
        let sel_tr = util::selector_must_parsed("tbody > tr");
        let sel_td = util::selector_must_parsed("td");

        let mut rows = Vec::new();
        for tr in doc.select(&sel_tr) {
            let cells: Vec<ElementRef> = tr.select(&sel_td).collect();
            // "no data" placeholder row spanning the whole table
            if cells.len() <= 1 {
                continue;
            }
            rows.push(parse_status_row(&cells)?);
        }
        Ok(rows)
    }
}

/// Data rows are marked `style="height:0px"`; spacer and detail rows are not.
pub fn is_zero_height(style: &str) -> bool {
    regex_is_match!(r"^\s*height\s*:\s*0(px)?\s*;?\s*$"i, style)
}

fn parse_count(field: &'static str, el: ElementRef) -> Result<u64> {
    let text = el.trimmed_text();
    text.parse().map_err(|_| Error::Malformed { field, text })
}

fn parse_problem_row(tr: ElementRef) -> Result<ProblemSummary> {
    let status = tr
        .select_opt("td.status span.label-success")
        .map(|el| el.cleaned_text())
        .unwrap_or_default();
    let pid = tr.select_first("td.pid a")?.trimmed_text();
    let title = tr.select_first("td.title a")?.trimmed_text();
    let labels = tr
        .select_opt("td.title span.label")
        .map(|el| el.cleaned_text())
        .unwrap_or_default();
    let source = tr.select_first("td.source")?.trimmed_text();
    let solved = parse_count("solved", tr.select_first("td.solvedCount a span.badge-info")?)?;
    let submitted = parse_count(
        "submitted",
        tr.select_first("td.submitCount a span.badge-info")?,
    )?;
    let avg = tr
        .select_first("td.avg span.badge-info")?
        .trimmed_text()
        .replace(" pts", "");

    Ok(ProblemSummary {
        status,
        pid,
        title,
        labels,
        source,
        solved,
        submitted,
        avg,
    })
}

fn parse_status_row(cells: &[ElementRef]) -> Result<SubmissionStatus> {
    if cells.len() < STATUS_COLUMNS {
        return Err(Error::NoSuchElement(format!(
            "tbody > tr > td:nth-child({})",
            cells.len() + 1
        )));
    }
    let text = |i: usize| cells[i].trimmed_text();

    let verdict = cells[3];
    let badge = verdict.select_opt("span.badge");
    let score = match badge {
        Some(el) => {
            let s = el.trimmed_text();
            s.parse().map_err(|_| Error::Malformed {
                field: "score",
                text: s,
            })?
        }
        None => 0,
    };
    let status = match verdict.select_opt("span.label") {
        Some(el) => el.cleaned_text(),
        None => {
            let all = verdict.all_text();
            let without_badge = match badge {
                Some(el) => all.replace(&el.all_text(), ""),
                None => all,
            };
            util::clean_text(&without_badge)
        }
    };

    Ok(SubmissionStatus {
        index: text(0),
        pid: text(1),
        user: text(2),
        status,
        score,
        time: text(4),
        memory: text(5),
        language: text(6),
        code_length: text(7),
        submit_time: text(8),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_height_style_variants() {
        assert!(is_zero_height("height:0px"));
        assert!(is_zero_height("height: 0px;"));
        assert!(is_zero_height(" HEIGHT:0 "));
        assert!(!is_zero_height("height:10px"));
        assert!(!is_zero_height("display:none"));
        assert!(!is_zero_height(""));
    }

    #[test]
    fn detail_with_extra_blocks_takes_first_six() {
        let html = (1..=7)
            .map(|i| format!("<div class='content'> block{} </div>", i))
            .collect::<String>();
        let d = NoiExtractor
            .problem_detail(&format!("<div class='problem'>{}</div>", html))
            .unwrap();
        assert_eq!(d.content, "block1");
        assert_eq!(d.limits, "block6");
    }

    #[test]
    fn status_placeholder_row_is_skipped() {
        let html = r#"<table class="table"><tbody>
            <tr><td colspan="9">No data</td></tr>
        </tbody></table>"#;
        assert_eq!(NoiExtractor.status_rows(html).unwrap(), vec![]);
    }

    #[test]
    fn status_short_row_is_an_error() {
        let html = r#"<table class="table"><tbody>
            <tr><td>1</td><td>1001</td><td>alice</td></tr>
        </tbody></table>"#;
        assert!(matches!(
            NoiExtractor.status_rows(html),
            Err(Error::NoSuchElement(_))
        ));
    }
}
