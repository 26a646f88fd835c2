//! "What's New" digest: one row per Python release notes page.

use scraper::ElementRef;
use url::Url;

use super::{log_skipped, pause, progress_bar};
use crate::config::{join_url, Settings};
use crate::error::Result;
use crate::html::{element_text, find_all, find_tag, load_document, single_line, Attrs};
use crate::http::Fetch;
use crate::types::ResultTable;

pub const HEADER: [&str; 3] = ["Ссылка на статью", "Заголовок", "Редактор, автор"];

/// Link, title and editor line for every release notes page.
pub fn whats_new<S: Fetch + ?Sized>(session: &S, settings: &Settings) -> Result<ResultTable> {
    let index_url = settings.endpoints.whats_new()?;
    let index = load_document(session, index_url.as_str())?;

    let main = find_tag(index.root_element(), "section", &Attrs::new().id("what-s-new-in-python"))?;
    let wrapper = find_tag(main, "div", &Attrs::new().class("toctree-wrapper"))?;
    let top_level = Attrs::new().class("toctree-l1");
    let sections: Vec<_> = find_all(wrapper, "li", &top_level).collect();

    let mut table = ResultTable::new(HEADER);
    let mut errors = Vec::new();
    let pb = progress_bar(sections.len(), "What's New pages");

    for (i, section) in sections.into_iter().enumerate() {
        pb.inc(1);
        if i > 0 {
            pause(settings.request_delay);
        }
        match release_row(session, &index_url, section) {
            Ok(row) => table.push(row),
            Err(e) => errors.push(e),
        }
    }
    pb.finish_and_clear();

    log_skipped("whats-new", &errors);
    Ok(table)
}

fn release_row<S: Fetch + ?Sized>(
    session: &S,
    index_url: &Url,
    section: ElementRef<'_>,
) -> Result<[String; 3]> {
    let anchor = find_tag(section, "a", &Attrs::new().present("href"))?;
    let href = anchor.value().attr("href").unwrap_or_default();
    let link = join_url(index_url, href)?;

    let page = load_document(session, link.as_str())?;
    let any = Attrs::new();
    let h1 = find_tag(page.root_element(), "h1", &any)?;
    let dl = find_tag(page.root_element(), "dl", &any)?;

    Ok([link.to_string(), element_text(h1), single_line(dl)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{settings_for, StaticPages};
    use pretty_assertions::assert_eq;

    const INDEX: &str = r#"<html><body>
      <section id="what-s-new-in-python"><h1>What’s New in Python</h1>
        <div class="toctree-wrapper compound"><ul>
          <li class="toctree-l1"><a class="reference internal" href="3.13.html">What’s New In Python 3.13</a>
            <ul><li class="toctree-l2"><a href="3.13.html#summary">Summary</a></li></ul></li>
          <li class="toctree-l1"><a class="reference internal" href="3.12.html">What’s New In Python 3.12</a></li>
          <li class="toctree-l1"><a class="reference internal" href="3.11.html">What’s New In Python 3.11</a></li>
        </ul></div>
      </section></body></html>"#;

    fn release_page(version: &str) -> String {
        format!(
            "<html><body><h1>What’s New In Python {version}</h1><dl><dt>Editor:</dt>\n<dd>Someone</dd></dl></body></html>"
        )
    }

    #[test]
    fn test_rows_for_reachable_pages() {
        let pages = StaticPages::new()
            .page("https://docs.test/whatsnew/", INDEX)
            .page("https://docs.test/whatsnew/3.13.html", &release_page("3.13"))
            .page("https://docs.test/whatsnew/3.11.html", &release_page("3.11"));

        let table = whats_new(&pages, &settings_for("https://docs.test/")).unwrap();

        assert_eq!(table.header, HEADER.map(String::from).to_vec());
        assert_eq!(
            table.rows,
            vec![
                vec![
                    "https://docs.test/whatsnew/3.13.html".to_string(),
                    "What’s New In Python 3.13".to_string(),
                    "Editor: Someone".to_string(),
                ],
                vec![
                    "https://docs.test/whatsnew/3.11.html".to_string(),
                    "What’s New In Python 3.11".to_string(),
                    "Editor: Someone".to_string(),
                ],
            ]
        );
    }

    #[test]
    fn test_page_without_dl_is_skipped() {
        let pages = StaticPages::new()
            .page("https://docs.test/whatsnew/", INDEX)
            .page("https://docs.test/whatsnew/3.13.html", "<h1>3.13</h1>")
            .page("https://docs.test/whatsnew/3.12.html", &release_page("3.12"))
            .page("https://docs.test/whatsnew/3.11.html", &release_page("3.11"));

        let table = whats_new(&pages, &settings_for("https://docs.test/")).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_missing_toctree_is_fatal() {
        let pages = StaticPages::new().page(
            "https://docs.test/whatsnew/",
            r#"<section id="what-s-new-in-python"></section>"#,
        );

        let err = whats_new(&pages, &settings_for("https://docs.test/")).unwrap_err();
        assert!(err.is_structure());
    }
}
