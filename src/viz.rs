//! Chart rendering with Plotters

use chrono::NaiveDate;
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;

/// Color palette cycled over pie slices
const PIE_COLORS: [RGBColor; 6] = [
    RGBColor(135, 206, 250),
    RGBColor(144, 238, 144),
    RGBColor(255, 165, 0),
    RGBColor(255, 182, 193),
    RGBColor(221, 160, 221),
    RGBColor(240, 230, 140),
];

/// Render a dated series as a line chart with point markers
pub fn line_chart(
    series: &[(NaiveDate, f64)],
    title: &str,
    y_desc: &str,
    x_label_format: &str,
    color: &RGBColor,
    output_path: &Path,
) -> crate::Result<()> {
    if series.is_empty() {
        return Ok(());
    }

    let y_max = series
        .iter()
        .map(|&(_, v)| v)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_max = if y_max.is_finite() && y_max > 0.0 {
        y_max * 1.1
    } else {
        1.0
    };
    let x_max = (series.len() - 1).max(1);

    let root = BitMapBackend::new(output_path, (960, 540)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Period")
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 15))
        .x_labels(series.len().min(12))
        .x_label_formatter(&|idx: &usize| {
            series
                .get(*idx)
                .map(|(date, _)| date.format(x_label_format).to_string())
                .unwrap_or_default()
        })
        .draw()?;

    chart.draw_series(LineSeries::new(
        series.iter().enumerate().map(|(i, &(_, v))| (i, v)),
        color,
    ))?;
    chart.draw_series(
        series
            .iter()
            .enumerate()
            .map(|(i, &(_, v))| Circle::new((i, v), 3, color.filled())),
    )?;

    root.present()?;
    println!("Chart saved to: {}", output_path.display());

    Ok(())
}

/// Render a ranking as a bar chart, one bar per entry in the given order
pub fn bar_chart(
    entries: &[(String, f64)],
    title: &str,
    x_desc: &str,
    y_desc: &str,
    color: &RGBColor,
    output_path: &Path,
) -> crate::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let y_max = entries
        .iter()
        .map(|&(_, v)| v)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_max = if y_max.is_finite() && y_max > 0.0 {
        y_max * 1.1
    } else {
        1.0
    };
    let n = entries.len();

    let root = BitMapBackend::new(output_path, (960, 540)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.6f64..(n as f64 - 0.4), 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 15))
        .x_labels(n)
        .x_label_formatter(&|x: &f64| {
            let i = x.round();
            if (x - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < n {
                entries[i as usize].0.clone()
            } else {
                String::new()
            }
        })
        .draw()?;

    for (i, &(_, value)) in entries.iter().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(i as f64 - 0.4, 0.0), (i as f64 + 0.4, value)],
            color.filled(),
        )))?;
    }

    root.present()?;
    println!("Chart saved to: {}", output_path.display());

    Ok(())
}

/// Render a count distribution as a pie chart
pub fn pie_chart(
    distribution: &[(String, usize)],
    title: &str,
    output_path: &Path,
) -> crate::Result<()> {
    if distribution.is_empty() {
        return Ok(());
    }

    let root = BitMapBackend::new(output_path, (640, 640)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, ("sans-serif", 30))?;

    let sizes: Vec<f64> = distribution.iter().map(|&(_, c)| c as f64).collect();
    let labels: Vec<String> = distribution.iter().map(|(m, _)| m.clone()).collect();
    let colors: Vec<RGBColor> = (0..sizes.len())
        .map(|i| PIE_COLORS[i % PIE_COLORS.len()])
        .collect();

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = (width.min(height) as f64) * 0.35;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 15).into_font().color(&BLACK));
    root.draw(&pie)?;

    root.present()?;
    println!("Chart saved to: {}", output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn month(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, m, 28).unwrap()
    }

    #[test]
    fn test_line_chart_renders() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("monthly.png");
        let series = vec![(month(1), 100.0), (month(2), 150.0), (month(3), 90.0)];

        let result = line_chart(
            &series,
            "Monthly Sales Trend",
            "Total Purchase Amount (USD)",
            "%Y-%m",
            &BLUE,
            &output_path,
        );
        assert!(result.is_ok());
        assert!(output_path.exists());
    }

    #[test]
    fn test_bar_chart_renders() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("top_customers.png");
        let entries = vec![
            ("C1".to_string(), 300.0),
            ("C2".to_string(), 250.0),
            ("C3".to_string(), 120.0),
        ];

        let result = bar_chart(
            &entries,
            "Top Customers by Spending",
            "Customer ID",
            "Total Purchase Amount (USD)",
            &GREEN,
            &output_path,
        );
        assert!(result.is_ok());
        assert!(output_path.exists());
    }

    #[test]
    fn test_pie_chart_renders() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("payments.png");
        let distribution = vec![
            ("Credit Card".to_string(), 40),
            ("Cash".to_string(), 30),
            ("Debit Card".to_string(), 20),
        ];

        let result = pie_chart(&distribution, "Payment Method Distribution", &output_path);
        assert!(result.is_ok());
        assert!(output_path.exists());
    }

    #[test]
    fn test_empty_series_skipped() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("empty.png");

        let result = line_chart(&[], "Empty", "y", "%Y-%m", &BLUE, &output_path);
        assert!(result.is_ok());
        assert!(!output_path.exists());
    }
}
