use super::{register, template_names};
use handlebars::Handlebars;
use seatguard_core::{models::NotificationKind, AppResult};

pub fn register_templates(registry: &mut Handlebars<'static>) -> AppResult<()> {
    let (subject, body) = template_names(NotificationKind::OverLimitWarning, "en");
    register(registry, &subject, r#"Your workspace is over its user limit"#)?;
    register(
        registry,
        &body,
        r#"<p class="body-text">Your workspace at <a href="{{site_url}}">{{site_url}}</a> now has more users than the free plan allows.</p>
<p class="body-text">Upgrade to a paid plan to stay within your subscription terms, or deactivate users you no longer need.</p>
<a href="{{billing_url}}" class="button">Upgrade now</a>"#,
    )?;

    let (subject, body) = template_names(NotificationKind::OverLimitWarning, "es");
    register(registry, &subject, r#"Su espacio de trabajo superó el límite de usuarios"#)?;
    register(
        registry,
        &body,
        r#"<p class="body-text">Su espacio de trabajo en <a href="{{site_url}}">{{site_url}}</a> tiene ahora más usuarios de los que permite el plan gratuito.</p>
<p class="body-text">Actualice a un plan de pago para cumplir con los términos de su suscripción, o desactive los usuarios que ya no necesite.</p>
<a href="{{billing_url}}" class="button">Actualizar ahora</a>"#,
    )?;

    Ok(())
}
