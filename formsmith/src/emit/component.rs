//! React component emitter.
//!
//! Renders a react-hook-form + Chakra UI component. Every top-level array
//! field gets its own `useFieldArray` handles named after the field. Arrays
//! nested inside array items are rendered by generated sub-components, each
//! owning its hook, so hooks never run inside loops.

use std::collections::HashSet;

use tracing::debug;

use super::source::{
    comment_text, escape_template, is_identifier, jsx_attr, jsx_text, property_key, quote,
    ts_literal, SourceWriter,
};
use super::traits::{ArtifactEmitter, ArtifactKind, EmitterConfig, GeneratedArtifact};
use crate::defaults::{default_rule, DefaultValueTree};
use crate::model::{Control, FieldDescriptor, FieldKind, FormDescriptor};
use crate::naming::{derive_type_identifier, derive_value_identifier, Identifiers};

/// Emits `{Type}.tsx`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentEmitter;

impl ComponentEmitter {
    pub fn new() -> Self {
        Self
    }
}

/// Names bound by `useFieldArray` for one array field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayHandles {
    pub fields: String,
    pub append: String,
    pub remove: String,
}

impl ArrayHandles {
    fn prefixed(base: &str) -> Self {
        Self {
            fields: format!("{}Fields", base),
            append: format!("{}Append", base),
            remove: format!("{}Remove", base),
        }
    }

    fn local() -> Self {
        Self {
            fields: "fields".to_string(),
            append: "append".to_string(),
            remove: "remove".to_string(),
        }
    }
}

/// Handles for every top-level array field of a form, in field order.
///
/// Handle names derive from field names and are made unique, so sibling
/// arrays never share a handle.
pub fn array_handles(fields: &[FieldDescriptor]) -> Vec<(String, ArrayHandles)> {
    let mut names = NameAllocator::default();
    fields
        .iter()
        .filter(|field| field.field_kind() == Some(FieldKind::Array))
        .map(|field| {
            let base = names.claim(&handle_base(&field.name));
            (field.name.clone(), ArrayHandles::prefixed(&base))
        })
        .collect()
}

fn handle_base(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        derive_value_identifier(name).unwrap_or_else(|_| "items".to_string())
    }
}

#[derive(Debug, Default)]
struct NameAllocator {
    taken: HashSet<String>,
}

impl NameAllocator {
    fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}{}", base, n);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// How a field's form path is written in the generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldPath {
    /// A fixed path such as `addresses`.
    Literal(String),
    /// A JavaScript expression holding the path, such as `path`.
    Expr(String),
    /// A template literal body such as `addresses.${index}`.
    Template(String),
}

impl FieldPath {
    /// As a JSX attribute value.
    fn attr(&self) -> String {
        match self {
            FieldPath::Literal(s) => jsx_attr(s),
            FieldPath::Expr(e) => format!("{{{}}}", e),
            FieldPath::Template(t) => format!("{{`{}`}}", t),
        }
    }

    /// As a function argument.
    fn arg(&self) -> String {
        match self {
            FieldPath::Literal(s) => quote(s),
            FieldPath::Expr(e) => e.clone(),
            FieldPath::Template(t) => format!("`{}`", t),
        }
    }

    fn template_body(&self) -> String {
        match self {
            FieldPath::Literal(s) => escape_template(s),
            FieldPath::Expr(e) => format!("${{{}}}", e),
            FieldPath::Template(t) => t.clone(),
        }
    }

    /// The path of the item at `index_var`.
    fn index(&self, index_var: &str) -> FieldPath {
        FieldPath::Template(format!("{}.${{{}}}", self.template_body(), index_var))
    }

    fn child(&self, name: &str) -> FieldPath {
        match self {
            FieldPath::Literal(s) => FieldPath::Literal(format!("{}.{}", s, name)),
            _ => FieldPath::Template(format!(
                "{}.{}",
                self.template_body(),
                escape_template(name)
            )),
        }
    }
}

/// Components and hooks referenced by the rendered fields.
#[derive(Debug, Default)]
struct Usage {
    input: bool,
    textarea: bool,
    checkbox: bool,
    radio: bool,
    select: bool,
    field_array: bool,
    nested_array: bool,
}

struct Renderer<'a> {
    ids: &'a Identifiers,
    config: &'a EmitterConfig,
    usage: Usage,
    names: NameAllocator,
    sub_components: Vec<String>,
}

impl<'a> Renderer<'a> {
    fn new(ids: &'a Identifiers, config: &'a EmitterConfig) -> Self {
        let mut names = NameAllocator::default();
        names.claim(ids.component_name());
        names.claim(&ids.props_name());
        Self {
            ids,
            config,
            usage: Usage::default(),
            names,
            sub_components: Vec::new(),
        }
    }

    fn render_top_fields(
        &mut self,
        w: &mut SourceWriter<'_>,
        fields: &[FieldDescriptor],
        handles: &[(String, ArrayHandles)],
        depth: usize,
    ) {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            let path = FieldPath::Literal(field.name.clone());
            match field.field_kind() {
                None => unsupported(w, field, &field.name, depth),
                Some(FieldKind::Array) => {
                    let own = handles
                        .iter()
                        .find(|(name, _)| name == &field.name)
                        .map(|(_, h)| h.clone())
                        .unwrap_or_else(|| ArrayHandles::prefixed(&handle_base(&field.name)));
                    self.render_array(w, field, &path, &own, &field.name, depth);
                }
                Some(kind) => self.render_leaf(w, field, kind, &path, depth, false),
            }
        }
    }

    /// A field inside an array item.
    fn render_item_field(
        &mut self,
        w: &mut SourceWriter<'_>,
        field: &FieldDescriptor,
        item: &FieldPath,
        parent: &str,
        depth: usize,
    ) {
        let path = item.child(&field.name);
        let display = format!("{}.{}", parent, field.name);
        match field.field_kind() {
            None => unsupported(w, field, &display, depth),
            Some(FieldKind::Array) => {
                let name = self.sub_component(field, &display);
                w.line(depth, format!("<{}", name));
                w.line(depth + 1, "control={control}");
                w.line(depth + 1, "register={register}");
                w.line(depth + 1, "formState={formState}");
                w.line(depth + 1, format!("path={}", path.attr()));
                w.line(depth, "/>");
            }
            Some(kind) => self.render_leaf(w, field, kind, &path, depth, true),
        }
    }

    fn render_leaf(
        &mut self,
        w: &mut SourceWriter<'_>,
        field: &FieldDescriptor,
        kind: FieldKind,
        path: &FieldPath,
        depth: usize,
        compact: bool,
    ) {
        if kind.profile().control == Control::Select {
            self.usage.select = true;
            self.render_select(w, field, path, depth, compact);
            return;
        }

        w.line(depth, "<FieldWrapper");
        wrapper_attrs(w, field, path, depth + 1);
        w.line(depth + 1, "field={");
        self.render_control(w, field, kind, path, depth + 2, compact);
        w.line(depth + 1, "}");
        w.line(depth, "/>");
    }

    fn render_select(
        &mut self,
        w: &mut SourceWriter<'_>,
        field: &FieldDescriptor,
        path: &FieldPath,
        depth: usize,
        compact: bool,
    ) {
        let d = depth + 1;
        w.line(depth, "<SelectFieldWrapper");
        w.line(d, format!("name={}", path.attr()));
        w.line(d, format!("label={}", jsx_attr(&field.label)));
        w.line(d, "control={control}");
        w.line(d, "formState={formState}");
        if field.options.is_empty() {
            w.line(d, "options={[]}");
        } else {
            w.line(d, "options={[");
            for option in &field.options {
                let value = quote(option);
                w.line(d + 1, format!("{{ label: {}, value: {} }},", value, value));
            }
            w.line(d, "]}");
        }
        w.line(d, format!("isRequired={{{}}}", field.required));
        w.line(d, format!("placeholder={}", jsx_attr(&field.placeholder_text())));
        if let Some(helper) = &field.helper_text {
            w.line(d, format!("helperText={}", jsx_attr(helper)));
        }
        if compact {
            w.line(d, "size=\"sm\"");
        }
        w.line(depth, "/>");
    }

    /// The input element of a field (or of one primitive array item).
    fn render_control(
        &mut self,
        w: &mut SourceWriter<'_>,
        field: &FieldDescriptor,
        kind: FieldKind,
        path: &FieldPath,
        depth: usize,
        compact: bool,
    ) {
        let d = depth + 1;
        match kind.profile().control {
            Control::Input { input_type } => {
                self.usage.input = true;
                w.line(depth, "<Input");
                w.line(d, format!("type=\"{}\"", input_type));
                w.line(d, format!("{{...register({})}}", path.arg()));
                w.line(d, format!("placeholder={}", jsx_attr(&field.placeholder_text())));
                if compact {
                    w.line(d, "size=\"sm\"");
                }
                w.line(depth, "/>");
            }
            Control::TextArea => {
                self.usage.textarea = true;
                w.line(depth, "<Textarea");
                w.line(d, format!("{{...register({})}}", path.arg()));
                w.line(d, format!("placeholder={}", jsx_attr(&field.placeholder_text())));
                if compact {
                    w.line(d, "size=\"sm\"");
                }
                w.line(d, "resize=\"vertical\"");
                w.line(depth, "/>");
            }
            Control::Checkbox => {
                self.usage.checkbox = true;
                controller_open(w, path, depth);
                let c = depth + 3;
                w.line(c, "<Checkbox.Root");
                w.line(c + 1, "checked={controllerField.value}");
                w.line(
                    c + 1,
                    "onCheckedChange={(e) => controllerField.onChange(!!e.checked)}",
                );
                if compact {
                    w.line(c + 1, "size=\"sm\"");
                }
                w.line(c, ">");
                w.line(c + 1, "<Checkbox.HiddenInput />");
                w.line(c + 1, "<Checkbox.Control />");
                w.line(
                    c + 1,
                    format!("<Checkbox.Label>{}</Checkbox.Label>", jsx_text(&field.label)),
                );
                w.line(c, "</Checkbox.Root>");
                controller_close(w, depth);
            }
            Control::RadioGroup => {
                self.usage.radio = true;
                controller_open(w, path, depth);
                let c = depth + 3;
                w.line(c, "<RadioGroup.Root");
                w.line(c + 1, "value={controllerField.value}");
                w.line(c + 1, "onValueChange={(e) => controllerField.onChange(e.value)}");
                w.line(c, ">");
                w.line(c + 1, "<Stack direction=\"column\">");
                for option in &field.options {
                    w.line(c + 2, format!("<RadioGroup.Item value={}>", jsx_attr(option)));
                    w.line(c + 3, "<RadioGroup.ItemHiddenInput />");
                    w.line(c + 3, "<RadioGroup.ItemIndicator />");
                    w.line(
                        c + 3,
                        format!("<RadioGroup.ItemText>{}</RadioGroup.ItemText>", jsx_text(option)),
                    );
                    w.line(c + 2, "</RadioGroup.Item>");
                }
                w.line(c + 1, "</Stack>");
                w.line(c, "</RadioGroup.Root>");
                controller_close(w, depth);
            }
            // rendered by render_select and render_array
            Control::Select | Control::FieldArray => {}
        }
    }

    fn render_array(
        &mut self,
        w: &mut SourceWriter<'_>,
        field: &FieldDescriptor,
        path: &FieldPath,
        handles: &ArrayHandles,
        display: &str,
        depth: usize,
    ) {
        self.usage.field_array = true;
        let label = jsx_text(&field.label);
        let count = &handles.fields;

        w.line(depth, "<FieldWrapper");
        wrapper_attrs(w, field, path, depth + 1);
        w.line(depth + 1, "field={");

        let b = depth + 2;
        w.line(b, "<VStack align=\"stretch\">");
        w.line(b + 1, "<HStack justify=\"space-between\" align=\"center\">");
        w.line(b + 2, "<Text fontSize=\"sm\" color=\"gray.600\">");
        w.line(
            b + 3,
            format!(
                "{{{}.length}} item{{{}.length !== 1 ? 's' : ''}}",
                count, count
            ),
        );
        w.line(b + 2, "</Text>");
        w.line(b + 2, "<Button");
        w.line(
            b + 3,
            format!(
                "onClick={{() => {}({})}}",
                handles.append,
                ts_literal(&DefaultValueTree::item_template(field))
            ),
        );
        w.line(b + 3, "size=\"sm\"");
        w.line(b + 3, "colorPalette=\"green\"");
        w.line(b + 3, "variant=\"outline\"");
        w.line(b + 2, ">");
        w.line(b + 3, format!("Add {} Item", label));
        w.line(b + 2, "</Button>");
        w.line(b + 1, "</HStack>");
        w.blank();

        let item = path.index("index");
        w.line(b + 1, format!("{{{}.map((item, index) => (", count));
        if field.children.is_empty() {
            w.line(b + 2, "<HStack key={item.id}>");
            self.render_control(w, field, field.item_kind(), &item, b + 3, true);
            remove_button(w, &handles.remove, b + 3);
            w.line(b + 2, "</HStack>");
        } else {
            w.line(b + 2, "<Box");
            w.line(b + 3, "key={item.id}");
            w.line(b + 3, "p={4}");
            w.line(b + 3, "border=\"1px\"");
            w.line(b + 3, "borderColor=\"gray.200\"");
            w.line(b + 3, "borderRadius=\"md\"");
            w.line(b + 3, "bg=\"gray.50\"");
            w.line(b + 2, ">");
            w.line(b + 3, "<HStack justify=\"space-between\" align=\"center\" mb={4}>");
            w.line(b + 4, "<Text fontWeight=\"medium\" color=\"gray.700\">");
            w.line(b + 5, format!("{} #{{index + 1}}", label));
            w.line(b + 4, "</Text>");
            remove_button(w, &handles.remove, b + 4);
            w.line(b + 3, "</HStack>");
            w.blank();
            w.line(b + 3, "<VStack align=\"stretch\">");
            for child in &field.children {
                self.render_item_field(w, child, &item, display, b + 4);
            }
            w.line(b + 3, "</VStack>");
            w.line(b + 2, "</Box>");
        }
        w.line(b + 1, "))}");
        w.blank();

        w.line(b + 1, format!("{{{}.length === 0 && (", count));
        w.line(
            b + 2,
            "<Box p={6} bg=\"gray.100\" borderRadius=\"md\" textAlign=\"center\">",
        );
        w.line(b + 3, "<Text color=\"gray.500\" fontSize=\"sm\" fontStyle=\"italic\">");
        w.line(
            b + 4,
            format!(
                "No items added yet. Click \"Add {} Item\" to create the first item.",
                label
            ),
        );
        w.line(b + 3, "</Text>");
        w.line(b + 2, "</Box>");
        w.line(b + 1, ")}");
        w.line(b, "</VStack>");

        w.line(depth + 1, "}");
        w.line(depth, "/>");
    }

    /// Generate the sub-component rendering a nested array; returns its name.
    fn sub_component(&mut self, field: &FieldDescriptor, display: &str) -> String {
        self.usage.nested_array = true;
        let path_name: String = display
            .split('.')
            .map(|segment| derive_type_identifier(segment).unwrap_or_else(|_| "Items".to_string()))
            .collect();
        let name = self
            .names
            .claim(&format!("{}{}FieldArray", self.ids.component_name(), path_name));

        let config = self.config;
        let mut w = SourceWriter::new(config);
        w.line(0, format!("interface {}Props {{", name));
        w.line(1, "control: Control<any>;");
        w.line(1, "register: UseFormRegister<any>;");
        w.line(1, "formState: FormState<any>;");
        w.line(1, "path: string;");
        w.line(0, "}");
        w.blank();
        w.line(
            0,
            format!(
                "const {name}: React.FC<{name}Props> = ({{ control, register, formState, path }}) => {{",
                name = name
            ),
        );
        w.line(1, "const { fields, append, remove } = useFieldArray({");
        w.line(2, "control,");
        w.line(2, "name: path,");
        w.line(1, "});");
        w.blank();
        w.line(1, "return (");
        self.render_array(
            &mut w,
            field,
            &FieldPath::Expr("path".to_string()),
            &ArrayHandles::local(),
            display,
            2,
        );
        w.line(1, ");");
        w.line(0, "};");

        self.sub_components.push(w.finish());
        name
    }
}

fn wrapper_attrs(w: &mut SourceWriter<'_>, field: &FieldDescriptor, path: &FieldPath, depth: usize) {
    w.line(depth, format!("label={}", jsx_attr(&field.label)));
    w.line(depth, format!("name={}", path.attr()));
    w.line(depth, "formState={formState}");
    w.line(depth, format!("isRequired={{{}}}", field.required));
    if let Some(helper) = &field.helper_text {
        w.line(depth, format!("helperText={}", jsx_attr(helper)));
    }
}

fn controller_open(w: &mut SourceWriter<'_>, path: &FieldPath, depth: usize) {
    w.line(depth, "<Controller");
    w.line(depth + 1, format!("name={}", path.attr()));
    w.line(depth + 1, "control={control}");
    w.line(depth + 1, "render={({ field: controllerField }) => (");
}

fn controller_close(w: &mut SourceWriter<'_>, depth: usize) {
    w.line(depth + 1, ")}");
    w.line(depth, "/>");
}

fn remove_button(w: &mut SourceWriter<'_>, remove: &str, depth: usize) {
    w.line(depth, "<Button");
    w.line(depth + 1, format!("onClick={{() => {}(index)}}", remove));
    w.line(depth + 1, "size=\"sm\"");
    w.line(depth + 1, "colorPalette=\"red\"");
    w.line(depth + 1, "variant=\"outline\"");
    w.line(depth, ">");
    w.line(depth + 1, "Remove");
    w.line(depth, "</Button>");
}

fn unsupported(w: &mut SourceWriter<'_>, field: &FieldDescriptor, display: &str, depth: usize) {
    w.line(
        depth,
        format!(
            "{{/* Unsupported field type: \"{}\" for field \"{}\" */}}",
            comment_text(field.kind.as_str()),
            comment_text(display)
        ),
    );
}

impl ArtifactEmitter for ComponentEmitter {
    fn id(&self) -> &'static str {
        "component"
    }

    fn name(&self) -> &'static str {
        "React Component Emitter"
    }

    fn file_extension(&self) -> &'static str {
        "tsx"
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Component
    }

    fn file_name(&self, ids: &Identifiers) -> String {
        ids.component_file()
    }

    fn emit(
        &self,
        form: &FormDescriptor,
        ids: &Identifiers,
        config: &EmitterConfig,
    ) -> GeneratedArtifact {
        let component = ids.component_name();
        let data_type = ids.form_data_type();
        let handles = array_handles(&form.fields);

        let mut renderer = Renderer::new(ids, config);
        let mut body = SourceWriter::new(config);
        renderer.render_top_fields(&mut body, &form.fields, &handles, 4);
        let usage = &renderer.usage;

        let mut w = SourceWriter::new(config);
        w.line(0, "import React from 'react';");
        w.line(0, "import {");
        w.line(1, "useForm,");
        if usage.field_array {
            w.line(1, "useFieldArray,");
        }
        if usage.checkbox || usage.radio {
            w.line(1, "Controller,");
        }
        if usage.nested_array {
            w.line(1, "type Control,");
            w.line(1, "type FormState,");
            w.line(1, "type UseFormRegister,");
        }
        w.line(0, "} from 'react-hook-form';");

        let chakra = [
            ("Box", true),
            ("Button", true),
            ("Checkbox", usage.checkbox),
            ("HStack", usage.field_array),
            ("Heading", true),
            ("Input", usage.input),
            ("RadioGroup", usage.radio),
            ("Stack", usage.radio),
            ("Text", usage.field_array),
            ("Textarea", usage.textarea),
            ("VStack", true),
        ];
        w.line(0, "import {");
        for (name, used) in chakra {
            if used {
                w.line(1, format!("{},", name));
            }
        }
        w.line(0, "} from '@chakra-ui/react';");
        w.line(0, "import { zodResolver } from '@hookform/resolvers/zod';");
        w.line(0, "import { FieldWrapper } from './FieldWrapper';");
        if usage.select {
            w.line(0, "import { SelectFieldWrapper } from './SelectFieldWrapper';");
        }
        w.line(
            0,
            format!(
                "import {{ {}, type {} }} from './schema';",
                ids.schema_name(),
                data_type
            ),
        );
        w.blank();

        w.line(0, format!("interface {} {{", ids.props_name()));
        w.line(1, format!("onSubmit?: (data: {}) => void;", data_type));
        w.line(0, "}");
        w.blank();

        for sub in &renderer.sub_components {
            w.append(sub);
            w.blank();
        }

        w.line(
            0,
            format!(
                "const {}: React.FC<{}> = ({{ onSubmit: onSubmitProp }}) => {{",
                component,
                ids.props_name()
            ),
        );
        let mut bindings = Vec::new();
        if usage.checkbox || usage.radio || usage.select || usage.field_array {
            bindings.push("control");
        }
        bindings.push("handleSubmit");
        if usage.input || usage.textarea || usage.nested_array {
            bindings.push("register");
        }
        bindings.push("formState");
        w.line(
            1,
            format!(
                "const {{ {} }} = useForm<{}>({{",
                bindings.join(", "),
                data_type
            ),
        );
        w.line(2, format!("resolver: zodResolver({}),", ids.schema_name()));
        w.line(2, "defaultValues: {");
        for field in &form.fields {
            w.line(
                3,
                format!(
                    "{}: {},",
                    property_key(&field.name),
                    default_rule(field).literal()
                ),
            );
        }
        w.line(2, "},");
        w.line(2, "mode: 'onChange',");
        w.line(1, "});");
        w.blank();

        for (name, h) in &handles {
            w.line(
                1,
                format!(
                    "const {{ fields: {}, append: {}, remove: {} }} = useFieldArray({{",
                    h.fields, h.append, h.remove
                ),
            );
            w.line(2, "control,");
            w.line(2, format!("name: {},", quote(name)));
            w.line(1, "});");
            w.blank();
        }

        w.line(1, format!("const onSubmit = async (data: {}) => {{", data_type));
        w.line(2, "try {");
        w.line(3, "console.log('Form submitted:', data);");
        w.line(3, "if (onSubmitProp) {");
        w.line(4, "onSubmitProp(data);");
        w.line(3, "}");
        w.line(2, "} catch (error) {");
        w.line(3, "console.error('Submission failed:', error);");
        w.line(2, "}");
        w.line(1, "};");
        w.blank();

        w.line(1, "return (");
        w.line(2, "<Box maxW=\"4xl\" mx=\"auto\" p={6}>");
        w.line(3, "<VStack align=\"stretch\" gap={6}>");
        w.line(4, "<Heading size=\"lg\" color=\"gray.700\" textAlign=\"center\">");
        w.line(5, jsx_text(&form.title));
        w.line(4, "</Heading>");
        w.blank();
        if !body.is_empty() {
            w.append(&body.finish());
            w.blank();
        }
        w.line(4, "<Button");
        w.line(5, "onClick={handleSubmit(onSubmit)}");
        w.line(5, "type=\"submit\"");
        w.line(5, "colorPalette=\"blue\"");
        w.line(5, "size=\"lg\"");
        w.line(5, "loading={formState.isSubmitting}");
        w.line(5, "loadingText=\"Submitting...\"");
        w.line(5, "mt={6}");
        w.line(4, ">");
        w.line(5, "Submit Form");
        w.line(4, "</Button>");
        w.line(3, "</VStack>");
        w.line(2, "</Box>");
        w.line(1, ");");
        w.line(0, "};");
        w.blank();
        w.line(0, format!("export default {};", component));

        let artifact = GeneratedArtifact::new(self.kind(), self.file_name(ids), w.finish());
        debug!(
            file = %artifact.file_name,
            lines = artifact.line_count(),
            array_fields = handles.len(),
            "emitted component"
        );
        artifact
    }
}
