//! Static support components and the npm packages generated code needs.
//!
//! The component artifact imports `FieldWrapper` and `SelectFieldWrapper`
//! from sibling files; these sources ship alongside it unchanged except for
//! indentation and line endings.

use serde::Serialize;

use super::source::SourceWriter;
use super::traits::EmitterConfig;

const FIELD_WRAPPER: &str = r#"import React from 'react';
import { Field } from '@chakra-ui/react';
import { get, type FormState } from 'react-hook-form';

interface FieldWrapperProps {
  label: string;
  name: string;
  field: React.ReactNode;
  formState: FormState<any>;
  isRequired?: boolean;
  helperText?: string;
}

export const FieldWrapper: React.FC<FieldWrapperProps> = ({
  label,
  name,
  field,
  formState,
  isRequired = false,
  helperText,
}) => {
  // name may be a nested path such as "addresses.0.street"
  const error = get(formState.errors, name);
  const touched = get(formState.touchedFields, name);
  const showError = Boolean(error) && (Boolean(touched) || formState.isSubmitted);

  return (
    <Field.Root invalid={showError}>
      <Field.Label>
        {label}
        {isRequired && <Field.RequiredIndicator />}
      </Field.Label>
      {field}
      {helperText && !showError && <Field.HelperText>{helperText}</Field.HelperText>}
      {showError && <Field.ErrorText>{error?.message}</Field.ErrorText>}
    </Field.Root>
  );
};
"#;

const SELECT_FIELD_WRAPPER: &str = r#"import React, { useMemo } from 'react';
import { Controller, get, type Control, type FormState } from 'react-hook-form';
import { Field, Portal, Select, createListCollection } from '@chakra-ui/react';

interface SelectOption {
  label: string;
  value: string;
}

interface SelectFieldWrapperProps {
  name: string;
  label: string;
  control: Control<any>;
  formState: FormState<any>;
  options: SelectOption[];
  isRequired?: boolean;
  placeholder?: string;
  helperText?: string;
  size?: 'sm' | 'md' | 'lg';
}

export const SelectFieldWrapper: React.FC<SelectFieldWrapperProps> = ({
  name,
  label,
  control,
  formState,
  options,
  isRequired = false,
  placeholder,
  helperText,
  size = 'md',
}) => {
  const collection = useMemo(() => createListCollection({ items: options }), [options]);

  const error = get(formState.errors, name);
  const touched = get(formState.touchedFields, name);
  const showError = Boolean(error) && (Boolean(touched) || formState.isSubmitted);

  return (
    <Controller
      name={name}
      control={control}
      render={({ field }) => (
        <Select.Root
          collection={collection}
          value={field.value ? [field.value] : []}
          onValueChange={(details) => field.onChange(details.value[0] ?? '')}
          size={size}
          invalid={showError}
        >
          <Select.Label>
            {label}
            {isRequired && <Field.RequiredIndicator />}
          </Select.Label>
          <Select.HiddenSelect />
          <Select.Control>
            <Select.Trigger>
              <Select.ValueText placeholder={placeholder ?? `Select ${label.toLowerCase()}`} />
            </Select.Trigger>
            <Select.IndicatorGroup>
              <Select.Indicator />
            </Select.IndicatorGroup>
          </Select.Control>
          <Portal>
            <Select.Positioner>
              <Select.Content>
                {options.map((option) => (
                  <Select.Item item={option} key={option.value}>
                    {option.label}
                    <Select.ItemIndicator />
                  </Select.Item>
                ))}
              </Select.Content>
            </Select.Positioner>
          </Portal>
          {helperText && !showError && <Field.HelperText>{helperText}</Field.HelperText>}
          {showError && <Field.ErrorText>{error?.message}</Field.ErrorText>}
        </Select.Root>
      )}
    />
  );
};
"#;

/// A static source file imported by the component artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportFile {
    pub file_name: String,
    pub content: String,
}

/// `FieldWrapper.tsx` and `SelectFieldWrapper.tsx`, formatted with `config`.
pub fn support_files(config: &EmitterConfig) -> Vec<SupportFile> {
    vec![
        SupportFile {
            file_name: "FieldWrapper.tsx".to_string(),
            content: reformat(FIELD_WRAPPER, config),
        },
        SupportFile {
            file_name: "SelectFieldWrapper.tsx".to_string(),
            content: reformat(SELECT_FIELD_WRAPPER, config),
        },
    ]
}

/// Re-indent a two-space indented source.
fn reformat(source: &str, config: &EmitterConfig) -> String {
    let mut w = SourceWriter::new(config);
    for line in source.lines() {
        let trimmed = line.trim_start_matches(' ');
        let depth = (line.len() - trimmed.len()) / 2;
        w.line(depth, trimmed);
    }
    w.finish()
}

/// An npm package the generated code depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Package {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

impl Package {
    /// `name@version`, as passed to `npm install`.
    pub fn spec(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

pub const REQUIRED_PACKAGES: &[Package] = &[
    Package {
        name: "@chakra-ui/react",
        version: "latest",
        description: "Simple, modular and accessible UI components",
    },
    Package {
        name: "@emotion/react",
        version: "latest",
        description: "Required peer dependency for Chakra UI",
    },
    Package {
        name: "@emotion/styled",
        version: "latest",
        description: "Required peer dependency for Chakra UI",
    },
    Package {
        name: "react-hook-form",
        version: "^7.53.0",
        description: "Form state management and validation",
    },
    Package {
        name: "@hookform/resolvers",
        version: "^3.9.0",
        description: "Resolver for Zod schema validation",
    },
    Package {
        name: "zod",
        version: "^3.23.8",
        description: "TypeScript-first schema validation",
    },
];

/// The `npm install` command line for every required package.
pub fn install_command() -> String {
    let specs: Vec<_> = REQUIRED_PACKAGES.iter().map(Package::spec).collect();
    format!("npm install {}", specs.join(" "))
}
