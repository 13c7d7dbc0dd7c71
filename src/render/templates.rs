//! Spanish copy and image file names
//!
//! Placeholders use `{name}` and are filled from the item substitutions.
//! Copy never uses `**` emphasis; the chat clients render it literally.

use crate::state_machine::{ImageId, TemplateId};

pub const DEFAULT_IMAGE_BASE_URL: &str =
    "https://raw.githubusercontent.com/hollyw00d337/BotMobile/main/assets/images/";

pub fn image_file(id: ImageId) -> &'static str {
    match id {
        ImageId::Welcome => "bienvenida-spotty.jpeg",
        ImageId::PackagesPromo => "paquetes-promocion.jpeg",
        ImageId::Portability3Steps => "portabilidad-3-pasos.jpeg",
        ImageId::HowToGetNip => "como-obtener-nip.jpeg",
        ImageId::HowToGetImei => "como-obtener-imei.jpeg",
    }
}

const HOURS: &str = "🕒 Horarios de atención:
• Lunes a Viernes: 9:00 - 18:00
• Sábados: 9:00 - 14:00";

pub fn template(id: TemplateId) -> &'static str {
    match id {
        TemplateId::GreetingGeneric => {
            "👋 ¡Hola! Soy Spotty, tu asistente móvil ☕
Estoy aquí para ayudarte a conectarte fácil, rápido y sin interrupciones 📶"
        }
        TemplateId::GreetingPersonalized => {
            "👋 ¡Hola! Soy Spotty, tu asistente móvil ☕

📡 Detecté que vienes de {carrier}.
Te ayudamos a cambiarte a Spot1Mobile sin perder tu número 📶"
        }
        TemplateId::MainMenu => {
            "📦 Tenemos paquetes para todos los usos, con cobertura nacional.
Elige entre chip físico o eSIM, ¡y hazlo todo desde aquí!

👇 ¿Qué necesitas hoy?

1️⃣ Conservar mi número (portabilidad)
2️⃣ Ver paquetes disponibles
3️⃣ Hablar con alguien del equipo

☕ ¡Vamos a hacerlo simple! Solo responde con el número de la opción."
        }
        TemplateId::InvalidMainOption => "Opción no válida. Por favor elige un número del 1 al 3.",

        TemplateId::PackagesCatalog => {
            "📱 ¡Conéctate con Spot1Mobile y #ViveSinInterrupciones!

🔸 Paquete S1 M100 – $100 / 30 días
✅ 6 GB por promoción + redes sociales ilimitadas
✅ 1,500 minutos + 250 SMS
💡 Perfecto si usas apps básicas y redes.

🔸 Paquete S1 M120 – $120 / 30 días
✅ 12 GB por promoción
✅ 1,500 minutos + 250 SMS
✅ Compartición de datos
🎥 Para quienes navegan, ven videos o hacen videollamadas.

🔸 Paquete S1 M220 – $220 / 30 días
✅ ¡72 GB por promoción!
✅ 1,500 minutos + 250 SMS
✅ Comparte tus datos
⚡ ¡Potencia para gamers, trabajo remoto o compartir internet!

👇 ¿Qué quieres hacer?

1️⃣ Conservar mi número con estos paquetes (Portabilidad)
2️⃣ Activar línea nueva con estos paquetes
3️⃣ Hablar con el equipo para más info
0️⃣ Volver al menú principal

Escribe el número de la opción que necesitas 👆"
        }
        TemplateId::PackagesComingSoon => {
            "📞 LÍNEA NUEVA

Esta opción estará disponible muy pronto.

Por ahora puedes escribirnos:
📲 WhatsApp: {whatsapp}

{hours}

1️⃣ Ir a portabilidad
0️⃣ Menú principal"
        }
        TemplateId::PackagesContact => {
            "👥 Contacta a nuestro equipo

📲 WhatsApp: {whatsapp}

⚡ Nuestro equipo te ayudará con:
• Detalles de cada paquete
• Disponibilidad en tu zona
• Proceso de activación
• Resolver cualquier duda

{hours}

0️⃣ Volver al menú principal"
        }
        TemplateId::PackagesInvalid => {
            "Opción no válida. Por favor elige:

1️⃣ Conservar mi número con estos paquetes (Portabilidad)
2️⃣ Activar línea nueva con estos paquetes
3️⃣ Hablar con el equipo para más info
0️⃣ Volver al menú principal"
        }

        TemplateId::PortabilityMenu => {
            "🔄 PORTABILIDAD

1️⃣ ¿Cómo conseguir NIP?
2️⃣ Documentos necesarios
3️⃣ Hablar con equipo
0️⃣ Menú principal

¿Qué opción necesitas?"
        }
        TemplateId::PortabilityFromPackages => {
            "🔄 PORTABILIDAD

¡Perfecto! Vamos a conservar tu número actual y activar uno de nuestros paquetes.

1️⃣ ¿Cómo conseguir NIP?
2️⃣ Documentos necesarios
3️⃣ Hablar con equipo
0️⃣ Menú principal

¿Qué opción necesitas?"
        }
        TemplateId::PortabilityDocuments => {
            "📄 Documentos necesarios

Para la portabilidad necesitas:

✅ Identificación oficial vigente
✅ Código IMEI (para eSIM)
✅ NIP de tu compañía actual
✅ Número telefónico a portar

Escribe 0 para volver al menú principal."
        }
        TemplateId::PortabilityContact => {
            "👥 Contacta a nuestro equipo

📲 WhatsApp: {whatsapp}

⚡ Nuestro equipo te ayudará con:
• Proceso de portabilidad
• Resolver dudas sobre documentos
• Verificar tu NIP
• Completar el trámite

{hours}

0️⃣ Volver al menú principal"
        }
        TemplateId::PortabilityInvalid => {
            "Opción no válida.

1️⃣ ¿Cómo conseguir NIP?
2️⃣ Documentos necesarios
3️⃣ Hablar con equipo
0️⃣ Menú principal"
        }

        TemplateId::NipInstructions => {
            "📱 ¡Listo para pedir tu NIP de portabilidad!

Solo hay 2 formas:
1. Manda un SMS con la palabra NIP al 051
2. O marca al 051 y sigue las instrucciones por llamada

📩 En ambos casos te llegará un mensaje con el NIP de 4 dígitos
💡 Recuerda hacerlo desde el número que quieres portar"
        }
        TemplateId::NipMenu => {
            "👇 ¿Ya lo pediste o quieres ayuda?

1️⃣ Ya tengo mi NIP, quiero avanzar 🚀
2️⃣ ¿Dónde lo escribo?
3️⃣ Quiero hablar con alguien del equipo
0️⃣ Menú principal"
        }
        TemplateId::NipCaptureRequest => {
            "✅ ¡Perfecto! Ya tienes tu NIP.

📝 Por favor, escríbeme tu NIP de 4 dígitos exactamente como te llegó en el mensaje:

🔒 Tu NIP estará seguro y lo usaremos para procesar tu portabilidad."
        }
        TemplateId::NipWhereToType => {
            "📝 ¿Dónde escribir tu NIP?

¡Envía tu NIP directamente aquí en este chat! 💬

Una vez que lo tengas, solo escríbelo y nuestro equipo lo procesará inmediatamente.

📱 Ejemplo:
\"Mi NIP es: 1234\"

También puedes contactarnos por:
📲 WhatsApp: {whatsapp}

0️⃣ Menú principal"
        }
        TemplateId::NipContact => {
            "👥 Contacta a nuestro equipo

📲 WhatsApp: {whatsapp}

{hours}

0️⃣ Volver al menú principal"
        }
        TemplateId::NipInvalid => {
            "Opción no válida.

1️⃣ Ya tengo mi NIP, quiero avanzar 🚀
2️⃣ ¿Dónde lo escribo?
3️⃣ Quiero hablar con alguien del equipo
0️⃣ Menú principal"
        }
        TemplateId::NipAccepted => {
            "✅ ¡Perfecto! Tu NIP {nip} ha sido registrado correctamente.

📶 Ahora vamos a verificar si tu teléfono es compatible con nuestra red.

🔹 Marca *#06# en el teclado de tu teléfono
🔹 Copia el número que aparece (es tu IMEI)
🔹 Pégalo aquí en el chat y lo validamos al instante ⚡

¿Listo para probarlo? 😎"
        }
        TemplateId::NipWrongLength => {
            "⚠️ El NIP debe tener exactamente 4 dígitos.

Recibí: {digits} ({count} dígitos)

📝 Por favor, escríbeme tu NIP de 4 dígitos exactamente como te llegó:

💡 Ejemplo: 1234"
        }
        TemplateId::NipNoDigits => {
            "❌ No pude encontrar números en tu mensaje.

📝 Por favor, escríbeme tu NIP de 4 dígitos:

💡 Ejemplo: 1234"
        }

        TemplateId::ImeiSummary => {
            "🚀 ¡Perfecto! Tu equipo es compatible y acepta eSIM.
🪄 Esto significa que podemos activarte en minutos, sin esperar envíos ni usar chip físico.

📋 Datos registrados:
• Compañía actual: {carrier}
• Número: {phone}
• NIP: {nip}
• IMEI: {imei}

👇 ¿Qué quieres hacer ahora?

1️⃣ Activarlo ya mismo
2️⃣ Ver otros paquetes disponibles
3️⃣ Saber más sobre qué es una eSIM
4️⃣ Hablar con alguien del equipo

✍️ Solo responde con el número de la opción."
        }
        TemplateId::ImeiWrongLength => {
            "😅 Oops, parece que ese IMEI no es válido.

Recibí: {digits} ({count} dígitos)

🔄 Asegúrate de copiar los 15 dígitos completos.

📲 Marca *#06# en el teclado de tu teléfono y copia el número tal como aparece.

¡Intenta de nuevo y lo validamos al instante! ⚡"
        }
        TemplateId::ImeiNoDigits => {
            "❌ No pude encontrar números en tu mensaje.

📲 Marca *#06# en el teclado de tu teléfono y pega aquí los 15 dígitos de tu IMEI."
        }

        TemplateId::EsimActivateStart => {
            "✍️ Ahora sí, vamos a preparar tu línea.

1️⃣ Por favor, escríbenos tu nombre completo (como aparece en tu INE o documento oficial).

🧾 Lo necesitamos para comenzar con el registro.
(Tranquilo, tus datos están protegidos y seguros con nosotros.)"
        }
        TemplateId::EsimPackagesReminder => {
            "📱 ¡Conéctate con Spot1Mobile y #ViveSinInterrupciones!

🔸 Paquete S1 M100 – $100 / 30 días
🔸 Paquete S1 M120 – $120 / 30 días
🔸 Paquete S1 M220 – $220 / 30 días

📞 Pregunta por disponibilidad y activa el tuyo hoy mismo.

1️⃣ Activarlo ya mismo
0️⃣ Volver al menú principal"
        }
        TemplateId::EsimExplainer => {
            "📲 ¿Qué es una eSIM?

🔹 eSIM = SIM digital, no necesitas chip físico
🔹 Activación instantánea en minutos desde tu teléfono
🔹 Más segura: no se puede perder, robar o dañar
🔹 Dual SIM: puedes tener 2 líneas en un teléfono

⚡ Ventajas:
• Sin esperar envíos
• Sin visitas a tiendas
• Activación 24/7

👇 ¿Listo para activar tu eSIM?

1️⃣ Sí, activar ahora
0️⃣ Volver al menú principal"
        }
        TemplateId::EsimContact => {
            "👥 Contacta a nuestro equipo

📲 WhatsApp: {whatsapp}

⚡ Nuestro equipo te ayudará con:
• Procesar tu activación eSIM
• Resolver dudas técnicas
• Elegir el mejor paquete
• Completar el registro

{hours}

0️⃣ Volver al menú principal"
        }
        TemplateId::EsimInvalid => {
            "Opción no válida. Por favor elige:

1️⃣ Activarlo ya mismo
2️⃣ Ver otros paquetes disponibles
3️⃣ Saber más sobre qué es una eSIM
4️⃣ Hablar con alguien del equipo

0️⃣ Volver al menú principal"
        }

        TemplateId::NameEmpty | TemplateId::NameNumericOnly => {
            "❌ Por favor, escríbenos tu nombre completo (como aparece en tu INE).

📝 Intenta de nuevo:"
        }
        TemplateId::NameNoLetters => {
            "❌ El nombre debe contener al menos una letra.

📝 Intenta de nuevo:"
        }
        TemplateId::EmailRequest => {
            "📧 ¡Genial, {first_name}!

2️⃣ Ahora, por favor escríbenos tu correo electrónico.

🔐 Lo necesitamos para enviarte la confirmación de la activación y cualquier detalle importante sobre tu línea.

💡 Si tienes más de uno, elige el que revises con frecuencia."
        }
        TemplateId::NumberRequest => {
            "📱 ¡Gracias!

3️⃣ Ahora, escríbenos el número que quieres portar (el que ya tienes con otra compañía).

🔎 Asegúrate de que tenga exactamente 10 dígitos."
        }
        TemplateId::NumberWrongLength => {
            "⚠️ El número debe tener exactamente 10 dígitos.

Recibí: {digits} ({count} dígitos)

📱 Por favor, escríbeme tu número de 10 dígitos:
💡 Ejemplo: 6141234567"
        }
        TemplateId::NumberNoDigits => {
            "❌ No pude encontrar números en tu mensaje.

📱 Por favor, escríbeme tu número telefónico de 10 dígitos:

💡 Ejemplo: 6141234567

O escribe \"0\" para volver al menú principal."
        }
        TemplateId::RegistrationComplete => {
            "✅ ¡Perfecto! Hemos registrado toda tu información correctamente.

📋 Resumen de tus datos:
• Nombre: {full_name}
• Correo: {email}
• Número a portar: {phone}
• Compañía actual: {carrier}
• NIP: {nip}
• IMEI: {imei}

🎉 Gracias por proporcionarnos tus datos. El equipo se contactará contigo pronto.

📲 También puedes contactarnos por WhatsApp: {whatsapp}

¡Que tengas un excelente día! 👋"
        }

        TemplateId::Support => {
            "👥 SOPORTE - Contacta a nuestro equipo

📲 WhatsApp: {whatsapp}

🗣️ Mensaje sugerido:
\"Hola, vengo del bot de Spotty y necesito ayuda\"

⚡ Nuestro equipo te ayudará con:
• Resolver dudas sobre servicios
• Información técnica
• Proceso de activación
• Cualquier consulta que tengas

{hours}

0️⃣ Volver al menú principal"
        }
        TemplateId::AdvanceNipWhatsapp => {
            "📲 Continuar por WhatsApp

Te vamos a conectar con nuestro equipo por WhatsApp:

🔗 WhatsApp: {whatsapp}

📝 Mensaje sugerido:
\"Hola, vengo del bot de Spotty. Tengo mi NIP y quiero portar mi número a Spot1Mobile\"

🕒 Horario: Lunes a Viernes 9:00-18:00

0️⃣ Volver al menú principal"
        }
        TemplateId::AdvanceNipPhone => {
            "📞 Hablar por teléfono

Llama directamente a nuestro equipo:

📱 Teléfono: {whatsapp}

🗣️ Al contestar menciona:
\"Vengo del bot de Spotty, tengo mi NIP para portabilidad\"

{hours}

0️⃣ Volver al menú principal"
        }
        TemplateId::AdvanceNipInvalid => {
            "Opción no válida.

1️⃣ Continuar por WhatsApp
2️⃣ Hablar por teléfono
0️⃣ Volver al menú principal"
        }

        TemplateId::Farewell => "¡Hasta la vista! 👋 Espero haberte ayudado. Regresa cuando gustes.",
        TemplateId::Fallback => {
            "🤔 No entendí tu mensaje.

Por favor escribe:
• Un número (1, 2, 3, etc.) para navegar
• \"0\" para volver al menú principal
• \"hola\" para reiniciar

¿En qué puedo ayudarte?"
        }
    }
}

/// Values shared by every template
pub(crate) fn shared_value(key: &str) -> Option<&'static str> {
    match key {
        "whatsapp" => Some(super::CONTACT_NUMBER),
        "hours" => Some(HOURS),
        _ => None,
    }
}
