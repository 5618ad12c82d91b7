use super::{register, template_names};
use handlebars::Handlebars;
use seatguard_core::{models::NotificationKind, AppResult};

pub fn register_templates(registry: &mut Handlebars<'static>) -> AppResult<()> {
    let (subject, body) = template_names(NotificationKind::AtLimitWarning, "en");
    register(registry, &subject, r#"Your workspace has reached its user limit"#)?;
    register(
        registry,
        &body,
        r#"<p class="body-text">Your workspace at <a href="{{site_url}}">{{site_url}}</a> has reached the maximum number of users allowed on the free plan.</p>
<p class="body-text">New users can still be invited, but your workspace will be over its limit. Upgrade to a paid plan to keep adding people to your team.</p>
<a href="{{billing_url}}" class="button">Upgrade now</a>"#,
    )?;

    let (subject, body) = template_names(NotificationKind::AtLimitWarning, "es");
    register(registry, &subject, r#"Su espacio de trabajo alcanzó el límite de usuarios"#)?;
    register(
        registry,
        &body,
        r#"<p class="body-text">Su espacio de trabajo en <a href="{{site_url}}">{{site_url}}</a> alcanzó el número máximo de usuarios permitidos en el plan gratuito.</p>
<p class="body-text">Aún puede invitar usuarios, pero su espacio de trabajo quedará por encima del límite. Actualice a un plan de pago para seguir sumando personas a su equipo.</p>
<a href="{{billing_url}}" class="button">Actualizar ahora</a>"#,
    )?;

    Ok(())
}
