use super::{register, template_names};
use handlebars::Handlebars;
use seatguard_core::{models::NotificationKind, AppResult};

pub fn register_templates(registry: &mut Handlebars<'static>) -> AppResult<()> {
    let (subject, body) = template_names(NotificationKind::PaymentFailed, "en");
    register(registry, &subject, r#"Action required: your payment failed"#)?;
    register(
        registry,
        &body,
        r#"<p class="body-text">We were unable to charge {{#if details.card_brand}}your {{details.card_brand}} card{{else}}your card{{/if}}{{#if details.last_four}} ending in <strong>{{details.last_four}}</strong>{{/if}}{{#if details.amount}} for <strong>{{details.amount}} {{details.currency}}</strong>{{/if}} for your workspace at <a href="{{site_url}}">{{site_url}}</a>.</p>
{{#if details.failure_message}}<p class="body-text">Reason: <span class="identifier">{{details.failure_message}}</span></p>{{/if}}
{{#if retry_date}}<p class="body-text">We will retry the charge on <strong>{{retry_date}}</strong>.</p>{{/if}}
<p class="body-text">Please update your payment information to avoid an interruption of service.</p>
<a href="{{billing_url}}" class="button">Update payment information</a>"#,
    )?;

    let (subject, body) = template_names(NotificationKind::PaymentFailed, "es");
    register(registry, &subject, r#"Acción requerida: su pago no se pudo procesar"#)?;
    register(
        registry,
        &body,
        r#"<p class="body-text">No pudimos realizar el cobro a {{#if details.card_brand}}su tarjeta {{details.card_brand}}{{else}}su tarjeta{{/if}}{{#if details.last_four}} terminada en <strong>{{details.last_four}}</strong>{{/if}}{{#if details.amount}} por <strong>{{details.amount}} {{details.currency}}</strong>{{/if}} para su espacio de trabajo en <a href="{{site_url}}">{{site_url}}</a>.</p>
{{#if details.failure_message}}<p class="body-text">Motivo: <span class="identifier">{{details.failure_message}}</span></p>{{/if}}
{{#if retry_date}}<p class="body-text">Volveremos a intentar el cobro el <strong>{{retry_date}}</strong>.</p>{{/if}}
<p class="body-text">Actualice su información de pago para evitar una interrupción del servicio.</p>
<a href="{{billing_url}}" class="button">Actualizar información de pago</a>"#,
    )?;

    Ok(())
}
