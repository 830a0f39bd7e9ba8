//! On-disk documentation tree used by the end-to-end scenarios.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const CATALOG_JSON: &str = r#"{
  "metadata": { "total_entries": 4, "generated_by": "fixtures" },
  "endpoints": [
    {
      "id": "create_instance",
      "source": "native",
      "category": "Instance",
      "name": "Criar Instância",
      "summary": "Mostra como criar uma instância do WhatsApp no gateway",
      "keywords": ["como criar uma instância", "nova instância"]
    },
    {
      "id": "send_text",
      "source": "native",
      "category": "Message",
      "name": "Enviar Mensagem de Texto",
      "summary": "Envia uma mensagem de texto para um contato",
      "keywords": ["mensagem", "texto", "enviar"],
      "location": { "request": { "startLine": 12, "endLine": 14 } }
    },
    {
      "id": "fetch_groups",
      "source": "native",
      "category": "Group",
      "name": "Buscar Grupos",
      "summary": "Lista os grupos da instância",
      "keywords": ["grupos"]
    }
  ],
  "webhooks": [
    {
      "id": "webhook_health",
      "source": "custom",
      "category": "Monitoring",
      "name": "Saúde dos Webhooks",
      "summary": "Verifica a saúde dos webhooks",
      "keywords": ["saúde dos webhooks", "health"]
    }
  ]
}"#;

pub const NATIVE_MAP_JSON: &str = r#"{
  "Instance": {
    "endpoints": [
      {
        "name": "Criar Instância",
        "location": {
          "request": { "startLine": 3, "endLine": 5 },
          "response": { "startLine": 6, "endLine": 8 }
        }
      }
    ]
  }
}"#;

pub const CUSTOM_MAP_JSON: &str = r#"{
  "Monitoring": {
    "endpoints": [
      {
        "name": "Saúde dos Webhooks",
        "location": { "request": { "startLine": 2, "endLine": 4 } }
      }
    ]
  }
}"#;

pub const NATIVE_BODY: &str = "# Evolution API
## Instance
### Criar Instância
POST /instance/create
{ \"instanceName\": \"minha-instancia\" }
Response 201
{ \"instance\": { \"status\": \"created\" } }
---
## Message
---
## Send
### Enviar Mensagem de Texto
POST /message/sendText/{instance}
{ \"number\": \"5511999999999\", \"text\": \"olá\" }
---
";

pub const CUSTOM_BODY: &str = "# Custom
### Saúde dos Webhooks
GET /webhook/health
Response 200 { \"status\": \"ok\" }
---
";

pub const FILTERS_DOC: &str = "<!-- SECTION:HEADER -->
# Filtros de mensagens
<!-- SECTION:API_ENDPOINTS -->
<!-- ENDPOINT:CREATE_INSTANCE -->
### Criar Instância com filtros
Envie `filters.audio.minDuration` no corpo da criação.
<!-- ENDPOINT:GET_FILTERS -->
### Consultar Filtros
<!-- SECTION:PRACTICAL_SCENARIOS -->
Descartar áudios com menos de dois segundos.
";

pub const WEBHOOK_DOC: &str = "<!-- ENDPOINT:WEBHOOK_HEALTH -->
### Saúde dos Webhooks
Retorna o estado das filas primária e secundária.
<!-- SUBSECTION:RESPONSE -->
{ \"primary\": \"ok\", \"secondary\": \"ok\" }
";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Creates the full documentation tree in a fresh temporary directory.
pub fn docs_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "consolidated-map.json", CATALOG_JSON);
    write(root, "native/map.json", NATIVE_MAP_JSON);
    write(root, "native/description.md", NATIVE_BODY);
    write(root, "custom/map.json", CUSTOM_MAP_JSON);
    write(root, "custom/description.md", CUSTOM_BODY);
    write(root, "custom/filters.md", FILTERS_DOC);
    write(root, "custom/dual-webhook-system.md", WEBHOOK_DOC);

    dir
}
