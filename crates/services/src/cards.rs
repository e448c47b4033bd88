use study_core::model::{HighlightSection, Slide};

use crate::images::{ImageHandle, ImageResolver};

/// Shown on a card whose slide has no text or markdown block.
pub const DEFAULT_CARD_DESCRIPTION: &str = "Tap to read more";

/// Carousel card summarizing one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub image: ImageHandle,
    pub heading: String,
    pub description: String,
}

/// Summarize a slide: its title, the first prose block, and the first image key.
pub fn slide_card(slide: &Slide, images: &dyn ImageResolver) -> CardItem {
    let description = slide
        .blocks()
        .iter()
        .find_map(|b| b.as_prose())
        .unwrap_or(DEFAULT_CARD_DESCRIPTION)
        .to_owned();
    let first_image = slide
        .blocks()
        .iter()
        .find_map(|b| b.image_keys().first())
        .map(String::as_str);

    CardItem {
        image: images.resolve(first_image),
        heading: slide.title().to_owned(),
        description,
    }
}

pub fn highlight_cards(section: &HighlightSection, images: &dyn ImageResolver) -> Vec<CardItem> {
    section
        .slides()
        .iter()
        .map(|s| slide_card(s, images))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::ImageTable;
    use study_core::model::{Block, SlideId};

    fn slide(blocks: Vec<Block>) -> Slide {
        Slide::new(SlideId::new(1), "Rally", blocks)
    }

    #[test]
    fn uses_first_prose_and_first_image() {
        let s = slide(vec![
            Block::Image { images: vec![] },
            Block::Image {
                images: vec!["market_rally_2".into(), "stock".into()],
            },
            Block::Markdown {
                markdown: "**up**".into(),
            },
            Block::Text {
                text: "later".into(),
            },
        ]);
        let card = slide_card(&s, &ImageTable::bundled());
        assert_eq!(card.heading, "Rally");
        assert_eq!(card.description, "**up**");
        assert_eq!(card.image.as_str(), "images/stock.png");
    }

    #[test]
    fn falls_back_when_slide_has_no_prose_or_image() {
        let table = ImageTable::bundled();
        let card = slide_card(
            &slide(vec![Block::Table {
                headers: vec!["A".into()],
                rows: vec![],
            }]),
            &table,
        );
        assert_eq!(card.description, DEFAULT_CARD_DESCRIPTION);
        assert_eq!(&card.image, table.placeholder());
    }

    #[test]
    fn highlight_cards_follow_slide_order() {
        let section = HighlightSection::new(
            "rally",
            "Market Rally",
            vec![
                Slide::new(SlideId::new(1), "first", vec![]),
                Slide::new(SlideId::new(2), "second", vec![]),
            ],
        );
        let headings: Vec<String> = highlight_cards(&section, &ImageTable::bundled())
            .into_iter()
            .map(|c| c.heading)
            .collect();
        assert_eq!(headings, ["first", "second"]);
    }
}
