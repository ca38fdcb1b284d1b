use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use rust_decimal::Decimal;

use crate::{entity::invoice, error::Error};

/// Everything the rendered invoice shows beside the stored financials.
pub struct InvoiceDocument<'a> {
    pub candidate_name: &'a str,
    pub opportunity_title: &'a str,
    pub client_company: &'a str,
    pub invoice: &'a invoice::Model,
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const VALUE_X_MM: f32 = 85.0;

/// Renders one invoice to an A4 PDF, entirely in memory.
pub fn render(document: &InvoiceDocument) -> Result<Vec<u8>, Error> {
    let invoice = document.invoice;

    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}-{:02}", invoice.year, invoice.month),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let font = doc.add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| Error::Pdf(err.to_string()))?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| Error::Pdf(err.to_string()))?;

    let mut y = PAGE_HEIGHT_MM - 20.0;

    push_line(&layer, &font_bold, "MONTHLY INVOICE", 20.0, MARGIN_MM, y);
    y -= 8.0;
    push_line(
        &layer,
        &font,
        &format!("Period: {} {}", month_name(invoice.month), invoice.year),
        11.0,
        MARGIN_MM,
        y,
    );
    y -= 6.0;
    push_line(&layer, &font, &format!("Candidate: {}", document.candidate_name), 11.0, MARGIN_MM, y);
    y -= 6.0;
    push_line(&layer, &font, &format!("Engagement: {}", document.opportunity_title), 11.0, MARGIN_MM, y);
    y -= 6.0;
    push_line(&layer, &font, &format!("Client: {}", document.client_company), 11.0, MARGIN_MM, y);

    y -= 6.0;
    divider(&layer, y);

    y -= 10.0;
    push_line(&layer, &font_bold, "Attendance", 13.0, MARGIN_MM, y);
    y -= 7.0;
    for (label, value) in [
        ("Working days in period", invoice.total_days.to_string()),
        ("Days present", invoice.present_days.to_string()),
        ("Regular days", invoice.regular_days.to_string()),
        ("Weekend days", invoice.weekend_days.to_string()),
        ("Holiday days", invoice.holiday_days.to_string()),
        ("Half days", invoice.half_days.to_string()),
        ("Overtime hours", format!("{:.2}", invoice.overtime_hours)),
        ("Hours worked", format!("{:.2}", invoice.total_hours)),
    ] {
        push_line(&layer, &font, label, 10.0, MARGIN_MM, y);
        push_line(&layer, &font, &value, 10.0, VALUE_X_MM, y);
        y -= 5.5;
    }

    y -= 0.5;
    divider(&layer, y);

    y -= 10.0;
    push_line(&layer, &font_bold, "Billing", 13.0, MARGIN_MM, y);
    y -= 7.0;
    for (label, amount) in [
        ("Regular", invoice.billing_regular),
        ("Weekend premium", invoice.billing_weekend),
        ("Holiday premium", invoice.billing_holiday),
        ("Overtime", invoice.billing_overtime),
    ] {
        push_line(&layer, &font, label, 10.0, MARGIN_MM, y);
        push_line(&layer, &font, &money(amount, &invoice.currency), 10.0, VALUE_X_MM, y);
        y -= 5.5;
    }
    push_line(&layer, &font_bold, "Billing total", 10.0, MARGIN_MM, y);
    push_line(&layer, &font_bold, &money(invoice.billing_total, &invoice.currency), 10.0, VALUE_X_MM, y);

    y -= 6.0;
    divider(&layer, y);

    y -= 10.0;
    push_line(&layer, &font_bold, "Settlement", 13.0, MARGIN_MM, y);
    y -= 7.0;
    for (label, amount) in [
        ("Candidate salary", invoice.salary_total),
        ("Commission", invoice.commission),
        ("Net profit", invoice.net_profit),
    ] {
        push_line(&layer, &font, label, 10.0, MARGIN_MM, y);
        push_line(&layer, &font, &money(amount, &invoice.currency), 10.0, VALUE_X_MM, y);
        y -= 5.5;
    }

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer).map_err(|err| Error::Pdf(err.to_string()))?;

    writer.into_inner().map_err(|err| Error::Pdf(err.to_string()))
}

fn push_line(layer: &PdfLayerReference, font: &IndirectFontRef, text: &str, size: f32, x: f32, y: f32) {
    layer.use_text(text, size, Mm(x), Mm(y), font);
}

fn divider(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_MM), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn money(amount: Decimal, currency: &str) -> String {
    format!("{amount} {currency}")
}

fn month_name(month: i32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_render_produces_a_pdf() {
        let invoice = invoice::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: None,
            updated_by: None,
            job_id: Uuid::new_v4(),
            year: 2024,
            month: 6,
            regular_days: 18,
            weekend_days: 2,
            holiday_days: 1,
            half_days: 2,
            overtime_hours: 4.0,
            total_days: 20,
            present_days: 20,
            total_hours: 164.0,
            per_day_rate: dec!(3100),
            billing_regular: dec!(76000),
            billing_weekend: dec!(12000),
            billing_holiday: dec!(8000),
            billing_overtime: dec!(2000),
            billing_total: dec!(98000),
            salary_total: dec!(62930),
            commission: dec!(9800),
            net_profit: dec!(25270),
            currency: "INR".to_owned(),
        };

        let document = InvoiceDocument {
            candidate_name: "Priya Sharma",
            opportunity_title: "Backend Engineer",
            client_company: "Acme Corp",
            invoice: &invoice,
        };

        let bytes = render(&document).expect("rendering should not fail");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
