use anyhow::{Error, ensure};
use charming::{
    Chart, ImageFormat, ImageRenderer,
    component::{Axis, Title},
    element::{AxisLabel, AxisType, LineStyle, SplitLine, Symbol, TextStyle},
    series::Line,
};

use crate::tracked::TrackedStock;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;

pub fn chart_title(stock: &TrackedStock) -> String {
    format!("{} | {}", stock.symbol, stock.price_label())
}

pub fn build_price_chart(stock: &TrackedStock) -> Result<Chart, Error> {
    ensure!(!stock.prices.is_empty(), "{}: prices is empty", stock.symbol);
    ensure!(
        stock.prices.len() == stock.dates.len(),
        "{}: length mismatch: prices={}, dates={}",
        stock.symbol,
        stock.prices.len(),
        stock.dates.len()
    );

    let chart = Chart::new()
        .background_color("#ffffff")
        .title(
            Title::new()
                .text(chart_title(stock))
                .left("center")
                .top("2%")
                .text_style(TextStyle::new().color("#000000").font_size(14)),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(stock.dates.clone())
                .axis_label(AxisLabel::new().rotate(45).interval(4).color("#fb923c")),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .scale(true)
                .axis_label(AxisLabel::new().color("#fb923c"))
                .split_line(SplitLine::new().line_style(LineStyle::new().color("#fed7aa"))),
        )
        .series(
            Line::new()
                .name(stock.symbol.as_str())
                .data(stock.prices.clone())
                .symbol(Symbol::Circle)
                .line_style(LineStyle::new().width(2).color("#ea580c")),
        );

    Ok(chart)
}

/// Render the stock's price history as a PNG.
pub fn render_price_chart(stock: &TrackedStock) -> Result<Vec<u8>, Error> {
    let chart = build_price_chart(stock)?;

    let mut renderer = ImageRenderer::new(WIDTH, HEIGHT);
    let png_bytes = renderer.render_format(ImageFormat::Png, &chart)?;
    Ok(png_bytes)
}
