//! Pricing section markup.

use concise_models::{PlanCatalog, PlanDescriptor, PRO_PLAN_ID};

use super::escape_html;

/// Where the free plan's call to action leads.
#[derive(Debug, Clone)]
pub struct PricingContext {
    /// Target for signed-in visitors
    pub upload_url: String,
    /// Target for anonymous visitors
    pub sign_in_url: String,
    pub signed_in: bool,
}

impl PricingContext {
    fn start_url(&self) -> &str {
        if self.signed_in {
            &self.upload_url
        } else {
            &self.sign_in_url
        }
    }
}

/// Render the pricing section, one card per catalog entry in catalog order.
pub fn render_pricing_section(catalog: &PlanCatalog, ctx: &PricingContext) -> String {
    let cards: String = catalog.iter().map(|plan| render_card(plan, ctx)).collect();

    format!(
        concat!(
            r#"<section id="pricing" class="pricing">"#,
            r#"<div class="pricing__inner">"#,
            r#"<h2 class="pricing__title">Pricing</h2>"#,
            r#"<div class="pricing__cards">{cards}</div>"#,
            "</div></section>"
        ),
        cards = cards
    )
}

fn render_card(plan: &PlanDescriptor, ctx: &PricingContext) -> String {
    let featured = plan.id == PRO_PLAN_ID;
    let card_class = if featured {
        "pricing-card pricing-card--featured"
    } else {
        "pricing-card"
    };

    let items: String = plan
        .items
        .iter()
        .map(|item| {
            format!(
                r#"<li class="pricing-card__item"><span aria-hidden="true">&#10003;</span><span>{}</span></li>"#,
                escape_html(item)
            )
        })
        .collect();

    let cta = match plan.checkout_url() {
        Some(link) => {
            let variant = if featured { "primary" } else { "secondary" };
            format!(
                r#"<a class="pricing-card__cta pricing-card__cta--{variant}" href="{href}">Buy Now <span aria-hidden="true">&#8594;</span></a>"#,
                variant = variant,
                href = escape_html(link),
            )
        }
        None => format!(
            r#"<a class="pricing-card__cta pricing-card__cta--free" href="{href}">Start for Free <span aria-hidden="true">&#8594;</span></a>"#,
            href = escape_html(ctx.start_url()),
        ),
    };

    format!(
        concat!(
            r#"<div class="{card_class}" data-plan-id="{id}">"#,
            r#"<div class="pricing-card__header">"#,
            r#"<p class="pricing-card__name">{name}</p>"#,
            r#"<p class="pricing-card__description">{description}</p>"#,
            "</div>",
            r#"<div class="pricing-card__price">"#,
            r#"<p class="pricing-card__amount">&#8377;{price}</p>"#,
            r#"<div class="pricing-card__period"><p>INR</p><p>/month</p></div>"#,
            "</div>",
            r#"<ul class="pricing-card__items">{items}</ul>"#,
            r#"<div class="pricing-card__actions">{cta}</div>"#,
            "</div>"
        ),
        card_class = card_class,
        id = escape_html(&plan.id),
        name = escape_html(&plan.name),
        description = escape_html(&plan.description),
        price = plan.price,
        items = items,
        cta = cta,
    )
}
