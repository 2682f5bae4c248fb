use crate::types::LOTTERIES;
use crate::web::{escape, layout};

use super::Page;

pub fn show() -> Page {
    Page::Html(render())
}

pub fn render() -> String {
    let mut body = String::from("<h1>Qual loteria você deseja gerar?</h1>\n<div class=\"cards\">\n");
    for card in LOTTERIES {
        if card.available {
            body.push_str(&format!(
                "<a class=\"card\" href=\"/gerar?loteria={}\">{}</a>\n",
                escape(card.slug),
                escape(card.name)
            ));
        } else {
            body.push_str(&format!(
                "<div class=\"card disabled\">{} (em breve)</div>\n",
                escape(card.name)
            ));
        }
    }
    body.push_str("</div>\n<p style=\"margin-top:20px\"><a href=\"/assinatura\">Minha assinatura</a></p>");
    layout("Loterias", &body, &[])
}
