use crate::{
    dto::{import::ImportReport, products::ProductPayload},
    error::AppResult,
    models::Category,
    store::CatalogStore,
};

/// One parsed catalogue row. Constructed by `parse_catalogue`, never mutated;
/// either mapped onto a product-create call or turned into one error line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedProduct {
    pub name: String,
    pub price: i64,
    pub category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub description: String,
    pub is_new_arrival: bool,
    pub is_best_seller: bool,
    pub is_on_sale: bool,
    pub sale_price: Option<i64>,
    pub image_url: String,
}

/// Parses raw delimited text into catalogue rows.
///
/// Blank lines are dropped; the first surviving line is a header and is
/// skipped without validation. Lines yielding fewer than three fields are
/// discarded as noise, not counted as failures.
pub fn parse_catalogue(text: &str) -> Vec<ParsedProduct> {
    let lines: Vec<&str> = text.split('\n').filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let mut products = Vec::new();
    for line in &lines[1..] {
        let values = split_fields(line);
        if values.len() < 3 {
            continue;
        }

        products.push(ParsedProduct {
            name: text_field(&values, 0),
            price: int_field(&values, 1),
            category: text_field(&values, 2),
            sizes: list_field(&values, 3),
            colors: list_field(&values, 4),
            description: text_field(&values, 5),
            is_new_arrival: bool_field(&values, 6),
            is_best_seller: bool_field(&values, 7),
            is_on_sale: bool_field(&values, 8),
            sale_price: values
                .get(9)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .and_then(|v| v.parse().ok()),
            image_url: text_field(&values, 10),
        });
    }

    products
}

/// Comma tokenizer honoring double-quoted spans: inside a span commas do not
/// split, and a quote character toggles the span state. Quote characters are
/// consumed, and there is no escape syntax, so a literal quote inside a value
/// is not representable; producers must avoid embedded quotes.
fn split_fields(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    values.push(current);

    values
}

fn text_field(values: &[String], index: usize) -> String {
    values
        .get(index)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

fn int_field(values: &[String], index: usize) -> i64 {
    values
        .get(index)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

fn list_field(values: &[String], index: usize) -> Vec<String> {
    values
        .get(index)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn bool_field(values: &[String], index: usize) -> bool {
    values
        .get(index)
        .map(|v| v.trim().to_lowercase() == "true")
        .unwrap_or(false)
}

fn find_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Validates and persists parsed rows one by one, in input order, and reports
/// the whole batch. Individual failures never abort the run; only a failure
/// to list categories escapes.
pub async fn import_products(
    store: &dyn CatalogStore,
    records: Vec<ParsedProduct>,
) -> AppResult<ImportReport> {
    let categories = store.list_categories().await?;
    let mut report = ImportReport::default();

    for record in records {
        if record.name.is_empty() {
            report.failed += 1;
            report.errors.push("Missing name for product".to_string());
            continue;
        }

        if record.price <= 0 {
            report.failed += 1;
            report
                .errors
                .push(format!("Invalid price for \"{}\"", record.name));
            continue;
        }

        let Some(category) = find_category(&categories, &record.category) else {
            report.failed += 1;
            report.errors.push(format!(
                "Category \"{}\" not found for \"{}\". Create it first.",
                record.category, record.name
            ));
            continue;
        };

        let payload = ProductPayload {
            name: record.name.clone(),
            price: record.price,
            category_id: category.id,
            images: if record.image_url.is_empty() {
                Vec::new()
            } else {
                vec![record.image_url]
            },
            sizes: if record.sizes.is_empty() {
                vec!["One Size".to_string()]
            } else {
                record.sizes
            },
            colors: if record.colors.is_empty() {
                None
            } else {
                Some(record.colors)
            },
            description: if record.description.is_empty() {
                None
            } else {
                Some(record.description)
            },
            is_active: true,
            is_new_arrival: record.is_new_arrival,
            is_best_seller: record.is_best_seller,
            is_on_sale: record.is_on_sale,
            sale_price: record.sale_price,
        };

        match store.create_product(payload).await {
            Ok(_) => report.success += 1,
            Err(err) => {
                report.failed += 1;
                report
                    .errors
                    .push(format!("Failed to import \"{}\": {err}", record.name));
            }
        }
    }

    Ok(report)
}

/// Downloadable template: the fixed header row plus two illustrative rows.
/// Generated on demand, never parsed by the importer.
pub fn import_template() -> String {
    [
        "name,price,category,sizes,colors,description,is_new_arrival,is_best_seller,is_on_sale,sale_price,image_url",
        r#"Black Oxford Shirt,25000,Shirts,"S,M,L,XL","Black,White",Premium cotton oxford shirt,true,false,false,,https://example.com/image.jpg"#,
        r#"White Sneakers,45000,Shoes,"40,41,42,43,44",White,Classic leather sneakers,false,true,true,38000,https://example.com/sneakers.jpg"#,
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_sub_lists_keep_their_commas() {
        let text = "name,price,category,sizes,colors,description,is_new_arrival,is_best_seller,is_on_sale,sale_price,image_url\n\
            Black Oxford Shirt,25000,Shirts,\"S,M,L,XL\",\"Black,White\",desc,true,false,false,,url";
        let parsed = parse_catalogue(text);

        assert_eq!(parsed.len(), 1);
        let p = &parsed[0];
        assert_eq!(p.name, "Black Oxford Shirt");
        assert_eq!(p.price, 25000);
        assert_eq!(p.category, "Shirts");
        assert_eq!(p.sizes, vec!["S", "M", "L", "XL"]);
        assert_eq!(p.colors, vec!["Black", "White"]);
        assert_eq!(p.description, "desc");
        assert!(p.is_new_arrival);
        assert!(!p.is_best_seller);
        assert!(!p.is_on_sale);
        assert_eq!(p.sale_price, None);
        assert_eq!(p.image_url, "url");
    }

    #[test]
    fn header_is_skipped_and_blank_lines_dropped() {
        let text = "name,price,category\n\n  \nTee,5000,Tops\n";
        let parsed = parse_catalogue(text);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Tee");
    }

    #[test]
    fn header_only_input_parses_to_nothing() {
        assert!(parse_catalogue("name,price,category\n").is_empty());
        assert!(parse_catalogue("").is_empty());
    }

    #[test]
    fn short_lines_are_discarded_silently() {
        let text = "name,price,category\nTee,5000,Tops\njust two,fields\nCap,8000,Caps";
        let parsed = parse_catalogue(text);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "Tee");
        assert_eq!(parsed[1].name, "Cap");
    }

    #[test]
    fn missing_trailing_fields_take_defaults() {
        let text = "header,row,here\nTee,5000,Tops";
        let parsed = parse_catalogue(text);
        let p = &parsed[0];
        assert!(p.sizes.is_empty());
        assert!(p.colors.is_empty());
        assert_eq!(p.description, "");
        assert!(!p.is_new_arrival && !p.is_best_seller && !p.is_on_sale);
        assert_eq!(p.sale_price, None);
        assert_eq!(p.image_url, "");
    }

    #[test]
    fn unparsable_price_defaults_to_zero() {
        let text = "h,h,h\nTee,not-a-number,Tops";
        assert_eq!(parse_catalogue(text)[0].price, 0);
    }

    #[test]
    fn sale_price_is_parsed_when_present() {
        let text = "h,h,h,h,h,h,h,h,h,h,h\nSneakers,45000,Shoes,,,,false,true,true,38000,url";
        let p = &parse_catalogue(text)[0];
        assert_eq!(p.sale_price, Some(38000));
        assert!(p.is_on_sale);
    }

    #[test]
    fn template_round_trips_through_the_parser() {
        let parsed = parse_catalogue(&import_template());
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "Black Oxford Shirt");
        assert_eq!(parsed[0].sizes, vec!["S", "M", "L", "XL"]);
        assert_eq!(parsed[1].name, "White Sneakers");
        assert_eq!(parsed[1].sale_price, Some(38000));
    }
}
