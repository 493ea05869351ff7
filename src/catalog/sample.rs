//! Built-in sample catalog.

use super::{PricingTier, ToolRecord};
use crate::types::ToolId;
use chrono::{DateTime, Utc};

/// 2024-01-01T00:00:00Z
const SAMPLE_TIMESTAMP: i64 = 1_704_067_200;

struct Seed {
    id: &'static str,
    title: &'static str,
    link: &'static str,
    categories: &'static [&'static str],
    highlights: &'static str,
    features: &'static str,
    pricing: PricingTier,
    note: &'static str,
    image: &'static str,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        title: "ChatGPT",
        link: "https://chat.openai.com/?ref=affiliate",
        categories: &["AI Chat", "Writing", "Productivity"],
        highlights: "Advanced AI chatbot for conversations, writing, and problem-solving",
        features: "Natural language processing, Code generation, Creative writing, Translation, Math problem solving",
        pricing: PricingTier::Freemium,
        note: "Most popular AI chatbot with GPT-4 capabilities",
        image: "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=400&h=300&fit=crop",
    },
    Seed {
        id: "2",
        title: "Midjourney",
        link: "https://www.midjourney.com/?ref=affiliate",
        categories: &["AI Art", "Image Generation", "Creative"],
        highlights: "Create stunning artwork and images with AI",
        features: "Text-to-image generation, High-quality outputs, Multiple art styles, Discord integration",
        pricing: PricingTier::Paid,
        note: "Premium AI art generation with exceptional quality",
        image: "https://images.unsplash.com/photo-1686191128892-3e87d4d6e8c1?w=400&h=300&fit=crop",
    },
    Seed {
        id: "3",
        title: "Notion AI",
        link: "https://www.notion.so/?ref=affiliate",
        categories: &["Productivity", "Writing", "Organization"],
        highlights: "AI-powered workspace for notes, docs, and collaboration",
        features: "AI writing assistance, Database management, Task organization, Team collaboration, Templates",
        pricing: PricingTier::Freemium,
        note: "All-in-one workspace with AI capabilities",
        image: "https://images.unsplash.com/photo-1611224923853-80b023f02d71?w=400&h=300&fit=crop",
    },
    Seed {
        id: "4",
        title: "Canva",
        link: "https://www.canva.com/?ref=affiliate",
        categories: &["Design", "Graphics", "Creative"],
        highlights: "Easy-to-use design platform with AI features",
        features: "AI design tools, Templates, Photo editing, Video creation, Brand kit",
        pricing: PricingTier::Freemium,
        note: "Popular design platform with AI-powered features",
        image: "https://images.unsplash.com/photo-1611162617213-7d7a39e9b1d7?w=400&h=300&fit=crop",
    },
    Seed {
        id: "5",
        title: "Grammarly",
        link: "https://www.grammarly.com/?ref=affiliate",
        categories: &["Writing", "Grammar", "Productivity"],
        highlights: "AI-powered writing assistant for better communication",
        features: "Grammar checking, Style suggestions, Plagiarism detection, Tone analysis, Writing insights",
        pricing: PricingTier::Freemium,
        note: "Essential tool for improving writing quality",
        image: "https://images.unsplash.com/photo-1455390582262-044cdead277a?w=400&h=300&fit=crop",
    },
    Seed {
        id: "6",
        title: "Copy.ai",
        link: "https://www.copy.ai/?ref=affiliate",
        categories: &["Marketing", "Copywriting", "AI Writing"],
        highlights: "AI copywriting tool for marketing and sales",
        features: "Marketing copy generation, Social media content, Email campaigns, Product descriptions, Blog posts",
        pricing: PricingTier::Freemium,
        note: "Specialized AI tool for marketing copy",
        image: "https://images.unsplash.com/photo-1552664730-d307ca884978?w=400&h=300&fit=crop",
    },
    Seed {
        id: "7",
        title: "Jasper",
        link: "https://www.jasper.ai/?ref=affiliate",
        categories: &["AI Writing", "Content Creation", "Marketing"],
        highlights: "AI content creation platform for businesses",
        features: "Long-form content, Marketing copy, Blog posts, Social media, SEO optimization",
        pricing: PricingTier::Paid,
        note: "Comprehensive AI writing platform for businesses",
        image: "https://images.unsplash.com/photo-1516321318423-f06f85e504b3?w=400&h=300&fit=crop",
    },
    Seed {
        id: "8",
        title: "Stable Diffusion",
        link: "https://stability.ai/?ref=affiliate",
        categories: &["AI Art", "Image Generation", "Open Source"],
        highlights: "Open-source AI image generation model",
        features: "Text-to-image generation, Image editing, Custom models, API access, Local deployment",
        pricing: PricingTier::Free,
        note: "Open-source alternative to commercial AI art tools",
        image: "https://images.unsplash.com/photo-1673187733777-4d8c2c5c8c8c?w=400&h=300&fit=crop",
    },
];

pub(super) fn tools() -> Vec<ToolRecord> {
    let stamp = DateTime::<Utc>::from_timestamp(SAMPLE_TIMESTAMP, 0).unwrap_or_default();
    SEEDS
        .iter()
        .filter_map(|seed| {
            let id = ToolId::from_string(seed.id.to_string()).ok()?;
            Some(ToolRecord {
                id,
                title: seed.title.to_string(),
                affiliate_link: seed.link.to_string(),
                categories: seed.categories.iter().map(|c| c.to_string()).collect(),
                highlights: seed.highlights.to_string(),
                features: seed.features.to_string(),
                pricing: seed.pricing,
                note: seed.note.to_string(),
                image_url: seed.image.to_string(),
                created_at: stamp,
                updated_at: stamp,
            })
        })
        .collect()
}
