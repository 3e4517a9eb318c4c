//! Landing-page gallery and site footer.
//!
//! The gallery is rebuilt from the registry on every mount: each enabled
//! entry becomes a link card with its thumbnail, a name tag, a date badge and
//! the description; disabled entries never reach the DOM. The footer carries
//! the site byline. Styling is inline so the page works without the host
//! stylesheet.

use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::games::{self, GameInfo};

const GALLERY_ID: &str = "ug-gallery";
const FOOTER_ID: &str = "ug-footer";

pub fn mount_gallery() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    doc.set_title("Unusual Games");
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    // Create / reuse the card grid, then rebuild its contents.
    let container = if let Some(el) = doc.get_element_by_id(GALLERY_ID) {
        el
    } else {
        let div = doc.create_element("div")?;
        div.set_id(GALLERY_ID);
        div.set_attribute("style", "display:grid; grid-template-columns:repeat(auto-fill, minmax(280px, 1fr)); gap:24px; max-width:1280px; margin:0 auto; padding:16px 16px 80px;").ok();
        body.append_child(&div)?;
        div
    };
    container.set_inner_html("");

    for game in games::enabled_games() {
        let card = doc.create_element("a")?;
        card.set_attribute("href", game.animation_page_url)?;
        card.set_attribute("target", "_blank")?;
        card.set_attribute("rel", "noopener noreferrer")?;
        card.set_attribute("style", "position:relative; display:block; overflow:hidden; border-radius:16px; border:1px solid rgba(255,255,255,0.2); box-shadow:0 8px 24px rgba(0,0,0,0.35); text-decoration:none; color:#fff; background:#101018;").ok();
        card.set_inner_html(&card_html(game));
        container.append_child(&card)?;
    }

    mount_footer(&doc)?;
    Ok(())
}

/// Inner markup of one gallery card. Registry strings are static and trusted,
/// so they go into the markup as-is.
fn card_html(game: &GameInfo) -> String {
    format!(
        "<img alt=\"Animation Display Image\" src=\"{img}\" style=\"display:block; width:100%; height:320px; object-fit:cover; filter:brightness(0.9);\"/>\
         <div style=\"position:absolute; top:272px; right:12px; border-radius:999px; background:rgba(255,255,255,0.12); padding:4px 12px; font-family:monospace; font-size:12px; backdrop-filter:blur(8px);\">{name}</div>\
         <div style=\"position:absolute; top:276px; left:16px; border-radius:6px; background:rgba(255,255,255,0.12); padding:3px 10px; font-family:monospace; font-size:12px;\">{date}</div>\
         <div style=\"padding:12px 16px 16px; font-family:sans-serif;\">\
         <h2 style=\"margin:0; font-size:18px; font-weight:600;\">{name}</h2>\
         <p style=\"margin:6px 0 0; font-size:13px; color:rgba(255,255,255,0.8);\">{desc}</p>\
         </div>",
        img = game.display_image_url,
        name = game.name,
        date = game.last_updated,
        desc = game.description,
    )
}

fn mount_footer(doc: &web_sys::Document) -> Result<(), JsValue> {
    if doc.get_element_by_id(FOOTER_ID).is_some() {
        return Ok(());
    }
    let Some(body) = doc.body() else {
        return Ok(());
    };
    let footer = doc.create_element("footer")?;
    footer.set_id(FOOTER_ID);
    footer.set_attribute("style", "position:fixed; bottom:0; left:0; width:100%; background:rgba(0,0,0,0.5); padding:16px; text-align:center; color:rgba(255,255,255,0.8); backdrop-filter:blur(8px); z-index:50;").ok();
    footer.set_inner_html(
        "Built By <a href=\"https://youtube.com/@DineshDOfficial\" target=\"_blank\" rel=\"noreferrer\" style=\"font-weight:600; color:#fff; text-decoration:none;\">Dinesh</a> \
         | <a href=\"https://github.com/DineshDOfficial/unusual-games\" target=\"_blank\" rel=\"noreferrer\" style=\"font-weight:600; color:inherit; text-decoration:none;\">(source)</a>",
    );
    body.append_child(&footer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::GAMES;

    #[test]
    fn card_markup_carries_all_display_fields() {
        for game in GAMES {
            let html = card_html(game);
            assert!(html.contains(game.display_image_url));
            assert!(html.contains(game.name));
            assert!(html.contains(game.last_updated));
            assert!(html.contains(game.description));
        }
    }

    #[test]
    fn card_markup_is_balanced_enough_to_embed() {
        let html = card_html(&GAMES[0]);
        assert_eq!(html.matches("<div").count(), html.matches("</div>").count());
        assert_eq!(html.matches("<h2").count(), html.matches("</h2>").count());
    }
}
