// src/services/municipalities.rs

//! Unit page: municipality code, name and link to its results.

use scraper::Html;
use url::Url;

use crate::models::Municipality;
use crate::utils::table::{TableSelectors, cell_text};

/// Header rows at the top of every table.
pub const HEADER_ROWS: usize = 2;
/// Column holding the municipality code.
pub const CODE_COL: usize = 0;
/// Column holding the municipality name.
pub const NAME_COL: usize = 1;
/// Column whose link leads to the results page. The code itself is the link.
pub const LINK_COL: usize = CODE_COL;

/// Extract every municipality listed on a unit page.
pub fn parse_municipalities(
    document: &Html,
    base: &Url,
    selectors: &TableSelectors,
) -> Vec<Municipality> {
    let mut municipalities = Vec::new();

    for table in selectors.tables(document) {
        for row in selectors.rows_after(table, HEADER_ROWS) {
            let cells = selectors.cells(row);
            if cells.len() <= NAME_COL {
                log::debug!("Skipping unit row with {} cells", cells.len());
                continue;
            }

            let Some(url) = selectors.link(cells[LINK_COL], base) else {
                continue;
            };

            let code = cell_text(cells[CODE_COL]);
            if code.is_empty() {
                continue;
            }

            municipalities.push(Municipality {
                code,
                name: cell_text(cells[NAME_COL]),
                url,
            });
        }
    }

    municipalities
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101";

    fn parse(html: &str) -> Vec<Municipality> {
        let document = Html::parse_document(html);
        let base = Url::parse(BASE).unwrap();
        parse_municipalities(&document, &base, &TableSelectors::new().unwrap())
    }

    #[test]
    fn test_single_municipality() {
        let municipalities = parse(
            r#"<table>
                <tr><th>Obec</th></tr>
                <tr><th>číslo</th><th>název</th><th>Výběr okrsku</th></tr>
                <tr><td><a href='/m1'>500054</a></td><td>Obec X</td><td>_</td></tr>
            </table>"#,
        );

        assert_eq!(
            municipalities,
            vec![Municipality {
                code: "500054".to_string(),
                name: "Obec X".to_string(),
                url: "https://www.volby.cz/m1".to_string(),
            }]
        );
    }

    #[test]
    fn test_link_outside_code_cell_is_ignored() {
        let municipalities = parse(
            r#"<table>
                <tr><th>h1</th></tr>
                <tr><th>h2</th></tr>
                <tr><td>529303</td><td>Benešov</td><td><a href="ps311?xobec=529303">X</a></td></tr>
                <tr><td><a href="ps311?xobec=532568">532568</a></td><td>Bernartice</td>
                    <td><a href="ps33?xobec=532568">X</a></td></tr>
            </table>"#,
        );

        assert_eq!(municipalities.len(), 1);
        assert_eq!(municipalities[0].code, "532568");
        assert_eq!(
            municipalities[0].url,
            "https://www.volby.cz/pls/ps2017nss/ps311?xobec=532568"
        );
    }

    #[test]
    fn test_count_is_rows_with_code_link() {
        let municipalities = parse(
            r#"<table>
                <tr><th>h1</th></tr>
                <tr><th>h2</th></tr>
                <tr><td><a href="a">1</a></td><td>A</td><td>X</td></tr>
                <tr><td><a href="b">2</a></td><td>B</td><td>X</td></tr>
                <tr><td>-</td><td>-</td><td>-</td></tr>
            </table>
            <table>
                <tr><th>h1</th></tr>
                <tr><th>h2</th></tr>
                <tr><td><a href="c">3</a></td><td>C</td><td>X</td></tr>
            </table>"#,
        );

        let codes: Vec<_> = municipalities.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["1", "2", "3"]);
        assert!(municipalities.iter().all(|m| !m.code.is_empty()));
    }

    #[test]
    fn test_empty_code_is_not_emitted() {
        let municipalities = parse(
            r#"<table>
                <tr><th>h1</th></tr>
                <tr><th>h2</th></tr>
                <tr><td><a href="a"><img src="x.png"></a></td><td>A</td></tr>
            </table>"#,
        );
        assert!(municipalities.is_empty());
    }
}
