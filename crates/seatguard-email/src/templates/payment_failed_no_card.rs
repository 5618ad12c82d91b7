use super::{register, template_names};
use handlebars::Handlebars;
use seatguard_core::{models::NotificationKind, AppResult};

pub fn register_templates(registry: &mut Handlebars<'static>) -> AppResult<()> {
    let (subject, body) = template_names(NotificationKind::NoCardPaymentFailed, "en");
    register(registry, &subject, r#"Action required: add a payment method"#)?;
    register(
        registry,
        &body,
        r#"<p class="body-text">We could not charge your subscription for <a href="{{site_url}}">{{site_url}}</a> because there is no payment method on file.</p>
<p class="body-text">Add a credit card to keep your workspace on its current plan.</p>
<a href="{{billing_url}}" class="button">Add payment information</a>"#,
    )?;

    let (subject, body) = template_names(NotificationKind::NoCardPaymentFailed, "es");
    register(registry, &subject, r#"Acción requerida: agregue un método de pago"#)?;
    register(
        registry,
        &body,
        r#"<p class="body-text">No pudimos cobrar su suscripción para <a href="{{site_url}}">{{site_url}}</a> porque no hay un método de pago registrado.</p>
<p class="body-text">Agregue una tarjeta de crédito para mantener su espacio de trabajo en el plan actual.</p>
<a href="{{billing_url}}" class="button">Agregar información de pago</a>"#,
    )?;

    Ok(())
}
