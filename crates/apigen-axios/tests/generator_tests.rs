use apigen_axios::AxiosClientGenerator;
use apigen_core::config::ApiGenConfig;
use apigen_core::parse;
use apigen_core::parse::document::OpenApiDocument;
use apigen_core::parse::operation::HttpMethod;
use apigen_core::{CodeGenerator, GenerationOutput, GenerationWarning};

const USERS: &str = include_str!("../../apigen-core/tests/fixtures/users.json");

const PETS: &str = r##"{
  "openapi": "3.0.0",
  "info": { "title": "Pets", "version": "1.0.0" },
  "paths": {
    "/pets/{petId}": {
      "get": {
        "operationId": "getPet",
        "summary": "Fetch a pet",
        "parameters": [
          { "name": "petId", "in": "path", "required": true, "schema": { "type": "string" } },
          { "name": "verbose", "in": "query", "schema": { "type": "boolean" } }
        ],
        "responses": {
          "200": {
            "description": "ok",
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
          }
        }
      }
    }
  },
  "components": {
    "schemas": {
      "Pet": {
        "type": "object",
        "required": ["name"],
        "properties": { "name": { "type": "string" } }
      }
    }
  }
}"##;

fn generate(doc: &OpenApiDocument, config: &ApiGenConfig) -> GenerationOutput {
    AxiosClientGenerator.generate(doc, config).expect("generation should succeed")
}

fn file<'a>(output: &'a GenerationOutput, path: &str) -> &'a str {
    output
        .files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("missing {path}"))
}

#[test]
fn typescript_layout() {
    let doc = parse::from_json(USERS).unwrap();
    let output = generate(&doc, &ApiGenConfig::default());

    let paths: Vec<&str> = output.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["types.ts", "api.ts", "index.ts"]);
}

#[test]
fn generation_is_deterministic() {
    let doc = parse::from_json(USERS).unwrap();
    let config = ApiGenConfig::default();
    let first = generate(&doc, &config);
    let second = generate(&doc, &config);
    assert_eq!(first.files, second.files);
}

#[test]
fn small_client_renders_exactly() {
    let doc = parse::from_json(PETS).unwrap();
    let output = generate(&doc, &ApiGenConfig::default());

    insta::assert_snapshot!(file(&output, "api.ts"), @r#"
    // Auto-generated API client from OpenAPI specification
    import axios, { AxiosInstance, AxiosResponse } from 'axios';
    import type { Pet } from './types';

    export class ApiClient {
      private client: AxiosInstance;

      constructor(baseURL: string = 'http://localhost:3000') {
        this.client = axios.create({
          baseURL,
          headers: {
            'Content-Type': 'application/json',
          },
        });
      }

      setAuthToken(token: string): void {
        this.client.defaults.headers.common['Authorization'] = `Bearer ${token}`;
      }

      /**
       * Fetch a pet
       */
      async getPet(petId: string, verbose?: boolean): Promise<AxiosResponse<Pet>> {
        const params = {
          verbose,
        };
        return this.client.get(`/pets/${petId}`, { params });
      }
    }

    export const apiClient = new ApiClient();
    "#);

    insta::assert_snapshot!(file(&output, "types.ts"), @r"
    // Auto-generated types from OpenAPI specification

    export interface Pet {
      name: string;
    }
    ");
}

#[test]
fn path_parameter_is_interpolated() {
    let doc = parse::from_json(USERS).unwrap();
    let output = generate(&doc, &ApiGenConfig::default());
    let api = file(&output, "api.ts");

    assert!(api.contains("async getUserById(id: number): Promise<AxiosResponse<UserResponse>> {"));
    assert!(api.contains("return this.client.get(`/api/users/${id}`);"));
    assert!(api.contains(
        "async resetUserPassword(id: number, data: any): Promise<AxiosResponse<SuccessResponse>> {"
    ));
    assert!(api.contains("return this.client.post(`/api/users/${id}/reset-password`, data);"));
}

#[test]
fn query_parameters_are_collected_and_headers_dropped() {
    let doc = parse::from_json(USERS).unwrap();
    let output = generate(&doc, &ApiGenConfig::default());
    let api = file(&output, "api.ts");

    assert!(api.contains(
        "async getUserList(page?: number, limit?: number, status?: 'active' | 'inactive'): Promise<AxiosResponse<UserListResponse>> {"
    ));
    assert!(api.contains("    const params = {\n      page,\n      limit,\n      status,\n    };\n"));
    assert!(api.contains("return this.client.get(`/api/users`, { params });"));
    assert!(!api.contains("Trace"));
}

#[test]
fn referenced_parameters_and_responses_resolve() {
    let doc = parse::from_json(USERS).unwrap();
    let output = generate(&doc, &ApiGenConfig::default());
    let api = file(&output, "api.ts");

    assert!(api.contains("async deleteUser(id: number): Promise<AxiosResponse<SuccessResponse>> {"));
    assert!(api.contains("return this.client.delete(`/api/users/${id}`);"));
    assert!(api.contains(
        "import type { LoginResponse, SuccessResponse, UserListResponse, UserResponse } from './types';"
    ));
}

#[test]
fn methods_follow_document_order() {
    let doc = parse::from_json(USERS).unwrap();
    let output = generate(&doc, &ApiGenConfig::default());
    let api = file(&output, "api.ts");

    let order = [
        "async userLogin(",
        "async getUserList(",
        "async createUser(",
        "async getUserById(",
        "async updateUser(",
        "async deleteUser(",
        "async resetUserPassword(",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| api.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn operation_without_id_is_skipped_with_warning() {
    let doc = parse::from_json(USERS).unwrap();
    let output = generate(&doc, &ApiGenConfig::default());

    assert!(!file(&output, "api.ts").contains("/health"));
    assert_eq!(
        output.warnings,
        vec![GenerationWarning::MissingOperationId {
            method: HttpMethod::Get,
            path: "/health".to_string(),
        }]
    );
}

#[test]
fn types_follow_schema_order() {
    let doc = parse::from_json(USERS).unwrap();
    let output = generate(&doc, &ApiGenConfig::default());
    let types = file(&output, "types.ts");

    assert!(types.starts_with("// Auto-generated types from OpenAPI specification\n"));
    assert!(types.contains(
        "export interface User {\n  id: number; // User ID\n  username: string; // Login name\n"
    ));
    assert!(types.contains("  status?: 'active' | 'inactive'; // Account status\n"));
    assert!(types.contains("  user?: User;\n"));
    assert!(types.contains("  data?: User[];\n"));
    assert!(types.contains("  details?: Record<string, any>; // Error details\n"));
    assert!(types.contains("export interface Empty {\n}\n"));
    assert!(types.find("interface User ").unwrap() < types.find("interface LoginRequest ").unwrap());
}

#[test]
fn index_reexports_both_modules() {
    let doc = parse::from_json(USERS).unwrap();
    let output = generate(&doc, &ApiGenConfig::default());

    assert_eq!(
        file(&output, "index.ts"),
        "// Auto-generated API SDK\nexport * from './api';\nexport * from './types';\n"
    );
}

#[test]
fn javascript_mode_drops_type_annotations() {
    let doc = parse::from_json(USERS).unwrap();
    let mut config = ApiGenConfig::default();
    config.generate_options.to_js = true;
    let output = generate(&doc, &config);

    let paths: Vec<&str> = output.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["types.js", "api.js", "index.js"]);

    let api = file(&output, "api.js");
    assert!(api.starts_with(
        "// Auto-generated API client from OpenAPI specification\nimport axios from 'axios';\n"
    ));
    assert!(!api.contains("import type"));
    assert!(!api.contains("private client"));
    assert!(api.contains("constructor(baseURL = 'http://localhost:3000') {"));
    assert!(api.contains("async getUserById(id) {"));
    assert!(api.contains("   * @param {number} id\n"));
    assert!(api.contains("async getUserList(page, limit, status) {"));
    assert!(api.contains("   * @param {number} [page]\n"));

    let types = file(&output, "types.js");
    assert!(types.contains(" * @typedef {Object} User\n"));
    assert!(types.contains(" * @property {number} id User ID\n"));
    assert!(types.contains(" * @property {'active' | 'inactive'} [status] Account status\n"));
    assert!(types.ends_with("\nexport {};\n"));
    assert!(!types.contains("interface"));
}

#[test]
fn unwrap_mode_returns_response_data() {
    let doc = parse::from_json(PETS).unwrap();
    let mut config = ApiGenConfig::default();
    config.generate_options.unwrap_response_data = true;
    let output = generate(&doc, &config);
    let api = file(&output, "api.ts");

    assert!(api.contains("import axios, { AxiosInstance } from 'axios';"));
    assert!(api.contains("async getPet(petId: string, verbose?: boolean): Promise<Pet> {"));
    assert!(api.contains(
        "    const response = await this.client.get(`/pets/${petId}`, { params });\n    return response.data;\n"
    ));
}

#[test]
fn custom_file_and_client_names() {
    let doc = parse::from_json(PETS).unwrap();
    let mut config = ApiGenConfig::default();
    config.file_name = Some("petClient.ts".to_string());
    config.generate_options.client_name = "PetStore".to_string();
    let output = generate(&doc, &config);

    let api = file(&output, "petClient.ts");
    assert!(api.contains("export class PetStore {"));
    assert!(api.contains("export const petStore = new PetStore();"));
    assert!(file(&output, "index.ts").contains("export * from './petClient';"));
}

#[test]
fn first_server_becomes_default_base_url() {
    let doc = parse::from_json(
        r#"{"openapi": "3.0.0", "info": {"title": "t", "version": "1"},
            "servers": [{"url": "https://api.example.com/v1"}], "paths": {}}"#,
    )
    .unwrap();
    let output = generate(&doc, &ApiGenConfig::default());

    assert!(file(&output, "api.ts")
        .contains("constructor(baseURL: string = 'https://api.example.com/v1') {"));
}

#[test]
fn empty_document_still_produces_all_files() {
    let doc = parse::from_json(r#"{"openapi": "3.0.0", "info": {"title": "t", "version": "1"}}"#)
        .unwrap();
    let output = generate(&doc, &ApiGenConfig::default());

    assert_eq!(output.files.len(), 3);
    let api = file(&output, "api.ts");
    assert!(api.contains("export class ApiClient {"));
    assert!(!api.contains("import type"));
    assert!(!api.contains("async "));
    assert_eq!(
        file(&output, "types.ts"),
        "// Auto-generated types from OpenAPI specification\n"
    );
}

#[test]
fn duplicate_operation_id_keeps_first() {
    let doc = parse::from_json(
        r#"{
          "openapi": "3.0.0",
          "info": {"title": "t", "version": "1"},
          "paths": {
            "/a": {"get": {"operationId": "fetch", "responses": {"200": {"description": "ok"}}}},
            "/b": {"get": {"operationId": "fetch", "responses": {"200": {"description": "ok"}}}}
          }
        }"#,
    )
    .unwrap();
    let output = generate(&doc, &ApiGenConfig::default());
    let api = file(&output, "api.ts");

    assert_eq!(api.matches("async fetch(").count(), 1);
    assert!(api.contains("this.client.get(`/a`)"));
    assert_eq!(
        output.warnings,
        vec![GenerationWarning::DuplicateOperationId {
            operation_id: "fetch".to_string(),
            method: HttpMethod::Get,
            path: "/b".to_string(),
        }]
    );
}

#[test]
fn optional_parameter_before_body_stays_positional() {
    let doc = parse::from_json(
        r#"{
          "openapi": "3.0.0",
          "info": {"title": "t", "version": "1"},
          "paths": {
            "/search": {
              "post": {
                "operationId": "search",
                "parameters": [{"name": "dry-run", "in": "query", "schema": {"type": "boolean"}}],
                "requestBody": {"content": {"application/json": {"schema": {"type": "object"}}}},
                "responses": {"200": {"description": "ok"}}
              }
            },
            "/items": {
              "delete": {
                "operationId": "purgeItems",
                "requestBody": {"content": {"application/json": {"schema": {"type": "object"}}}},
                "responses": {"204": {"description": "gone"}}
              }
            }
          }
        }"#,
    )
    .unwrap();
    let output = generate(&doc, &ApiGenConfig::default());
    let api = file(&output, "api.ts");

    assert!(api.contains(
        "async search(dryRun: boolean | undefined, data: any): Promise<AxiosResponse<any>> {"
    ));
    assert!(api.contains("      'dry-run': dryRun,\n"));
    assert!(api.contains("return this.client.post(`/search`, data, { params });"));
    assert!(api.contains("return this.client.delete(`/items`, { data });"));
}

#[test]
fn missing_success_response_falls_back_to_any() {
    let doc = parse::from_json(
        r##"{
          "openapi": "3.0.0",
          "info": {"title": "t", "version": "1"},
          "paths": {
            "/jobs/{id}": {
              "get": {
                "operationId": "getJob",
                "parameters": [
                  {"name": "id", "in": "path", "required": true, "schema": {"type": "string"}},
                  {"$ref": "#/components/parameters/Missing"}
                ],
                "responses": {"404": {"description": "missing"}}
              }
            }
          }
        }"##,
    )
    .unwrap();
    let output = generate(&doc, &ApiGenConfig::default());

    assert!(file(&output, "api.ts")
        .contains("async getJob(id: string): Promise<AxiosResponse<any>> {"));
    assert_eq!(
        output.warnings,
        vec![
            GenerationWarning::UnresolvedParameter {
                operation_id: "getJob".to_string(),
                reference: "#/components/parameters/Missing".to_string(),
            },
            GenerationWarning::NoSuccessResponse {
                operation_id: "getJob".to_string(),
                method: HttpMethod::Get,
                path: "/jobs/{id}".to_string(),
            },
        ]
    );
}

#[test]
fn clashing_parameter_names_get_distinct_identifiers() {
    let doc = parse::from_json(
        r#"{
          "openapi": "3.0.0",
          "info": {"title": "t", "version": "1"},
          "paths": {
            "/a": {
              "get": {
                "operationId": "listA",
                "parameters": [{"name": "params", "in": "query", "schema": {"type": "string"}}],
                "responses": {"200": {"description": "ok"}}
              }
            },
            "/b": {
              "post": {
                "operationId": "postB",
                "parameters": [{"name": "data", "in": "query", "schema": {"type": "string"}}],
                "requestBody": {"content": {"application/json": {"schema": {"type": "object"}}}},
                "responses": {"200": {"description": "ok"}}
              }
            },
            "/c/{id}": {
              "get": {
                "operationId": "getC",
                "parameters": [
                  {"name": "id", "in": "query", "schema": {"type": "string"}},
                  {"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}},
                  {"name": "it's", "in": "query", "schema": {"type": "string"}}
                ],
                "responses": {"200": {"description": "ok"}}
              }
            }
          }
        }"#,
    )
    .unwrap();
    let output = generate(&doc, &ApiGenConfig::default());
    let api = file(&output, "api.ts");

    assert!(api.contains("async listA(params_2?: string): Promise<AxiosResponse<any>> {"));
    assert!(api.contains("      'params': params_2,\n"));

    assert!(api.contains("async postB(data_2: string | undefined, data: any): Promise<AxiosResponse<any>> {"));
    assert!(api.contains("      'data': data_2,\n"));
    assert!(api.contains("return this.client.post(`/b`, data, { params });"));

    assert!(api.contains("async getC(id: number, id_2?: string, itS?: string): Promise<AxiosResponse<any>> {"));
    assert!(api.contains("      'id': id_2,\n"));
    assert!(api.contains("      'it\\'s': itS,\n"));
    assert!(api.contains("return this.client.get(`/c/${id}`, { params });"));
}

#[test]
fn unwrap_mode_does_not_shadow_response_local() {
    let doc = parse::from_json(
        r#"{
          "openapi": "3.0.0",
          "info": {"title": "t", "version": "1"},
          "paths": {
            "/r": {
              "get": {
                "operationId": "getR",
                "parameters": [{"name": "response", "in": "query", "schema": {"type": "string"}}],
                "responses": {"200": {"description": "ok"}}
              }
            }
          }
        }"#,
    )
    .unwrap();
    let mut config = ApiGenConfig::default();
    config.generate_options.unwrap_response_data = true;
    let output = generate(&doc, &config);
    let api = file(&output, "api.ts");

    assert!(api.contains("async getR(response_2?: string): Promise<any> {"));
    assert!(api.contains("      'response': response_2,\n"));
    assert!(api.contains("    const response = await this.client.get(`/r`, { params });\n"));
}

#[test]
fn colliding_file_name_keeps_three_distinct_files() {
    let doc = parse::from_json(PETS).unwrap();
    let mut config = ApiGenConfig::default();
    config.file_name = Some("index.ts".to_string());
    let output = generate(&doc, &config);

    let paths: Vec<&str> = output.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["types.ts", "api.ts", "index.ts"]);
    assert!(file(&output, "index.ts").contains("export * from './api';"));
    assert_eq!(
        output.warnings,
        vec![GenerationWarning::ClientFileCollision {
            file_name: "index.ts".to_string(),
            fallback: "api.ts".to_string(),
        }]
    );
}
