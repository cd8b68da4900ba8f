use jsniscope_search::{Term, query_to_terms};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub struct TermView {
    pub position: usize,
    pub text: String,
    pub quoted: bool,
}

impl From<Term> for TermView {
    fn from(term: Term) -> Self {
        Self {
            position: term.position,
            text: term.text,
            quoted: term.quoted,
        }
    }
}

pub fn render(query: &str) -> String {
    let views: Vec<TermView> = query_to_terms(query).into_iter().map(TermView::from).collect();
    if views.is_empty() {
        return "No terms.".to_string();
    }
    Table::new(&views).with(Style::psql()).to_string()
}

pub fn run(query: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render(query));
    Ok(())
}
