use super::ui;
use crate::core::RemoteTrigger;
use crate::core::trigger::trigger_remote_update;
use anyhow::{Result, bail};
use std::io::Write;

pub async fn run<W: Write>(trigger: Option<&dyn RemoteTrigger>, output: &mut W) -> Result<()> {
    let Some(trigger) = trigger else {
        bail!("No trigger URL configured; add a 'trigger.url' entry to the config file");
    };

    let pb = ui::new_spinner("Requesting rate update...");
    let ack = trigger_remote_update(trigger).await;
    pb.finish_and_clear();

    let style_type = if ack.is_accepted() {
        ui::StyleType::Success
    } else {
        ui::StyleType::Error
    };
    writeln!(output, "{}", ui::style_text(&ack.to_string(), style_type))?;
    Ok(())
}
