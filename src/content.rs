//! Site content: artists, FAQ, blog, gallery
//!
//! Static marketing copy is configuration, not code: the core takes a
//! [`SiteContent`] at construction and never reaches for globals, so the
//! same binary can serve seed content, a JSON file, or whatever a CMS
//! produces.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub image_url: String,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub date: String,
    pub image_url: String,
    pub summary: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: u32,
    pub src: String,
    pub alt: String,
}

/// Everything the static sections of the site render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub artists: Vec<Artist>,
    pub faq: Vec<FaqEntry>,
    pub posts: Vec<BlogPost>,
    pub gallery: Vec<GalleryImage>,
}

impl SiteContent {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::DataError(format!("Bad content JSON: {}", e)))
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
            && self.faq.is_empty()
            && self.posts.is_empty()
            && self.gallery.is_empty()
    }

    /// The studio's built-in content, used when no content file is given.
    pub fn seed() -> Self {
        SiteContent {
            artists: vec![Artist {
                id: 1,
                name: "Thomas Darrow".into(),
                specialty: "Black & Grey, Cartoon, Color, Neo Trad, Scratch Style Blackwork"
                    .into(),
                image_url: "https://i.imgur.com/LEfKmIk.jpeg".into(),
                bio: "As the sole artist and founder of Corrupt Ink, Thomas Darrow is a \
                      versatile tattooist with a passion for a wide range of styles, bringing a \
                      unique vision and meticulous skill to every piece."
                    .into(),
            }],
            faq: vec![
                FaqEntry {
                    question: "How do I take care of my new tattoo?".into(),
                    answer: "Follow the aftercare instructions provided by your artist \
                             precisely: wash gently with mild, unscented soap, pat dry, and \
                             apply a thin layer of the recommended ointment."
                        .into(),
                },
                FaqEntry {
                    question: "Does getting a tattoo hurt?".into(),
                    answer: "There is some level of pain involved, varying with placement, \
                             size, and personal tolerance. Most people describe a constant \
                             scratching or stinging."
                        .into(),
                },
                FaqEntry {
                    question: "How much does a tattoo cost?".into(),
                    answer: "Cost depends on size, complexity, detail, and placement. We quote \
                             during the consultation. A good tattoo isn't cheap, and a cheap \
                             tattoo isn't good."
                        .into(),
                },
                FaqEntry {
                    question: "How should I prepare for my appointment?".into(),
                    answer: "Sleep well, eat a solid meal, stay hydrated, and avoid alcohol \
                             and blood thinners for at least 24 hours before your session."
                        .into(),
                },
            ],
            posts: vec![
                BlogPost {
                    id: 1,
                    title: "The Timeless Appeal of Neo Traditional Tattoos".into(),
                    author: "Thomas Darrow".into(),
                    date: "October 26, 2023".into(),
                    image_url: "https://picsum.photos/seed/blog1/1200/800".into(),
                    summary: "The history and key characteristics of Neo Traditional work, and \
                              why it remains one of the most beloved modern styles."
                        .into(),
                    body: "Neo Traditional tattooing evolves the classic American Traditional \
                           style: bold lines and a vivid palette, with added depth, shading, \
                           and subject matter drawn from Art Nouveau and Art Deco."
                        .into(),
                },
                BlogPost {
                    id: 2,
                    title: "Aftercare 101: Protecting Your Investment".into(),
                    author: "Thomas Darrow".into(),
                    date: "October 15, 2023".into(),
                    image_url: "https://picsum.photos/seed/blog2/1200/800".into(),
                    summary: "A new tattoo is an open wound and a piece of art. Proper \
                              aftercare decides how it heals and how it ages."
                        .into(),
                    body: "Keep the tattoo clean with mild soap and lukewarm water, pat dry, \
                           and use a thin layer of ointment. For the first weeks avoid sun, \
                           soaking, and picking at scabs."
                        .into(),
                },
            ],
            gallery: vec![
                GalleryImage {
                    id: 1,
                    src: "https://i.imgur.com/99EFAok.jpeg".into(),
                    alt: "Black and grey tattoo of a surreal scene".into(),
                },
                GalleryImage {
                    id: 2,
                    src: "https://i.imgur.com/5xBt6ns.jpeg".into(),
                    alt: "Colorful cartoon style skull tattoo".into(),
                },
                GalleryImage {
                    id: 3,
                    src: "https://i.imgur.com/OQbw1SM.jpeg".into(),
                    alt: "Black and grey skull with floral accents tattoo".into(),
                },
                GalleryImage {
                    id: 4,
                    src: "https://i.imgur.com/dCuwYpT.jpeg".into(),
                    alt: "Intricate geometric mandala tattoo on a hand".into(),
                },
                GalleryImage {
                    id: 5,
                    src: "https://i.imgur.com/CNl4K19.jpeg".into(),
                    alt: "Vibrant neo-traditional bird tattoo".into(),
                },
                GalleryImage {
                    id: 6,
                    src: "https://i.imgur.com/WDIuAeN.jpeg".into(),
                    alt: "Black and grey realism portrait tattoo".into(),
                },
            ],
        }
    }
}
