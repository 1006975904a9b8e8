//! The fixed slide structure of the generated deck.
//!
//! Each row names a slide layout of the template together with the text that
//! goes into the slide's title and content placeholders. Some rows repeat on
//! purpose: the deck shows the problem statement and the solution twice.

use crate::fields::{Field, FieldMapping};
use serde::Serialize;

/// Layout used for the opening slide.
pub const THEME_LAYOUT: &str = "Layout_Tema_Padrao";

/// Layout used for every other slide.
pub const TITLE_AND_CONTENT_LAYOUT: &str = "Layout_Titulo_e_Conteudo";

/// File name the finished deck is written to.
pub const DEFAULT_OUTPUT_FILENAME: &str = "Apresentacao_ProjetoIntegrador2_Senac.pptx";

/// Body source of a row: a field of the document, or a literal.
#[derive(Debug, Clone, Copy)]
enum Body {
    Field(Field),
    Literal(&'static str),
}

/// (layout, title, body) for every slide, in output order.
const ROWS: [(&str, &str, Body); 10] = [
    (THEME_LAYOUT, "Title 1", Body::Field(Field::Theme)),
    (
        TITLE_AND_CONTENT_LAYOUT,
        "Apresentação do Problema",
        Body::Field(Field::ProblemStatement),
    ),
    (
        TITLE_AND_CONTENT_LAYOUT,
        "Apresentação do Problema",
        Body::Field(Field::ProblemStatement),
    ),
    (
        TITLE_AND_CONTENT_LAYOUT,
        "Benchmark e Concorrentes",
        Body::Field(Field::BenchmarkAndCompetitors),
    ),
    (
        TITLE_AND_CONTENT_LAYOUT,
        "Público-alvo e Tamanho do mercado",
        Body::Field(Field::TargetAudienceAndMarketSize),
    ),
    (TITLE_AND_CONTENT_LAYOUT, "Solução", Body::Field(Field::Solution)),
    (TITLE_AND_CONTENT_LAYOUT, "Solução", Body::Field(Field::Solution)),
    (
        TITLE_AND_CONTENT_LAYOUT,
        "Modelo de negócio",
        Body::Field(Field::BusinessModel),
    ),
    (TITLE_AND_CONTENT_LAYOUT, "Encerramento", Body::Field(Field::Closing)),
    (
        TITLE_AND_CONTENT_LAYOUT,
        "Redes sociais ou outras Informações",
        Body::Literal(""),
    ),
];

/// One slide of the content plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideSpec {
    /// Name of the slide layout to instantiate.
    pub layout: String,

    /// Text for placeholders whose name starts with `Title`. Empty leaves them untouched.
    pub title: String,

    /// Text for placeholders whose name starts with `Content`. Empty leaves them untouched.
    pub body: String,
}

impl SlideSpec {
    /// Create a new row.
    pub fn new(
        layout: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            layout: layout.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Build the ten-row content plan by filling the fixed structure with `fields`.
pub fn deck_plan(fields: &FieldMapping) -> Vec<SlideSpec> {
    let rows: Vec<SlideSpec> = ROWS
        .iter()
        .map(|(layout, title, body)| {
            let body = match body {
                Body::Field(field) => fields.get(*field),
                Body::Literal(text) => *text,
            };
            SlideSpec::new(*layout, *title, body)
        })
        .collect();

    log::debug!(
        "Built deck plan with {} rows from {} filled fields",
        rows.len(),
        fields.filled_count()
    );

    rows
}
