//! Text rendering of the storefront.

use crate::config::ClientConfig;
use crate::view_client::View;
use shopmicro_core::ShopError;
use std::fmt;

struct Page<'a> {
    view: &'a View,
    config: &'a ClientConfig,
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ShopMicro")?;
        writeln!(f, "E-commerce Demo Platform")?;
        writeln!(f)?;

        writeln!(f, "Products")?;
        let width = self
            .view
            .products
            .iter()
            .map(|p| p.name.chars().count())
            .max()
            .unwrap_or(0);
        for product in &self.view.products {
            writeln!(f, "  {:<width$}  ${}", product.name, product.price)?;
        }
        writeln!(f)?;

        writeln!(f, "Recommended for User {}", self.config.user_id)?;
        let tags = self
            .view
            .recommendations
            .iter()
            .map(|r| format!("[{r}]"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "  {tags}")?;
        writeln!(f)?;

        write!(
            f,
            "Backend: {} | ML: {}",
            self.config.api_base, self.config.ml_base
        )
    }
}

/// Renders the product grid and the recommendation tags, both in array order.
#[must_use]
pub fn render_view(view: &View, config: &ClientConfig) -> String {
    Page { view, config }.to_string()
}

/// Renders the single error state.
#[must_use]
pub fn render_error(error: &ShopError) -> String {
    match error {
        ShopError::UpstreamFault { message, .. } => format!("Error: {message}"),
        other => format!("Error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use shopmicro_core::Product;
    use std::str::FromStr;

    #[test]
    fn test_render_lists_products_and_tags_in_order() {
        let view = View {
            products: vec![
                Product::new(1, "Laptop", BigDecimal::from_str("999.99").unwrap()),
                Product::new(2, "Mouse", BigDecimal::from_str("24.99").unwrap()),
            ],
            recommendations: vec!["Mouse".to_string(), "Laptop".to_string()],
        };

        let text = render_view(&view, &ClientConfig::default());

        let laptop = text.find("Laptop  $999.99").unwrap();
        let mouse = text.find("Mouse   $24.99").unwrap();
        assert!(laptop < mouse);
        assert!(text.contains("Recommended for User 42"));
        assert!(text.contains("[Mouse] [Laptop]"));
        assert!(text.ends_with("Backend: http://localhost:8080 | ML: http://localhost:5000"));
    }

    #[test]
    fn test_render_empty_view() {
        let view = View {
            products: Vec::new(),
            recommendations: Vec::new(),
        };
        let text = render_view(&view, &ClientConfig::default());
        assert!(text.contains("Products"));
    }

    #[test]
    fn test_render_error_shows_message_once() {
        let err = ShopError::upstream("recommendations", "Failed to fetch data (HTTP 500)");
        assert_eq!(render_error(&err), "Error: Failed to fetch data (HTTP 500)");
    }
}
