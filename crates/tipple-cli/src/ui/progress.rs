//! Weekly consumption bar.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::context::UiContext;
use super::render::kv;
use crate::constants::PROGRESS_BAR_WIDTH;

/// Resolution of the bar: positions per ounce.
const STEPS_PER_OZ: f64 = 10.0;

/// Bar length and position for `consumed` out of `limit`, capped at full.
pub fn bar_position(consumed_oz: f64, limit_oz: f64) -> (u64, u64) {
    let len = (limit_oz * STEPS_PER_OZ).round().max(1.0) as u64;
    let pos = (consumed_oz * STEPS_PER_OZ).round().max(0.0) as u64;
    (pos.min(len), len)
}

fn bar_template(ctx: &UiContext, over: bool) -> String {
    let bar = if !ctx.color {
        format!("{{bar:{}}}", PROGRESS_BAR_WIDTH)
    } else if over {
        format!("{{bar:{}.red}}", PROGRESS_BAR_WIDTH)
    } else {
        format!("{{bar:{}.cyan/blue}}", PROGRESS_BAR_WIDTH)
    };
    format!("{{prefix}} [{}] {{msg}}", bar)
}

/// Print consumed-vs-limit for the trailing week.
///
/// Pretty mode draws an indicatif bar; other modes print `key=value` lines.
pub fn weekly_progress(ctx: &UiContext, consumed_oz: f64, limit_oz: f64) -> anyhow::Result<()> {
    if ctx.mode.is_json() {
        return Ok(());
    }
    if !ctx.allows_animation() {
        println!("{}", kv(ctx, "Weekly oz", &format!("{:.1}", consumed_oz)));
        println!("{}", kv(ctx, "Weekly limit oz", &format!("{}", limit_oz)));
        return Ok(());
    }

    let (pos, len) = bar_position(consumed_oz, limit_oz);
    let chars = if ctx.unicode {
        "\u{2588}\u{2589}\u{258A}\u{258B}\u{258C}\u{258D}\u{258E}\u{258F} "
    } else {
        "#>-"
    };
    let style = ProgressStyle::with_template(&bar_template(ctx, consumed_oz > limit_oz))
        .map_err(|e| anyhow::anyhow!("Invalid progress template: {}", e))?
        .progress_chars(chars);

    let bar = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stdout());
    bar.set_style(style);
    bar.set_prefix("Weekly");
    bar.set_message(format!("{:.1}/{}oz", consumed_oz, limit_oz));
    bar.set_position(pos);
    bar.abandon();
    Ok(())
}
