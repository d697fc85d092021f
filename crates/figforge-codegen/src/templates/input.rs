pub const HTML: &str = r#"<div class="{css_class}-wrapper">
  <mat-form-field class="{css_class}-field"
                  [appearance]="appearance"
                  [floatLabel]="floatLabel">
    <mat-label>{{ label || '{display_name}' }}</mat-label>
    <input matInput
           [type]="type"
           [placeholder]="placeholder"
           [required]="required"
           [disabled]="disabled"
           [(ngModel)]="value"
           (input)="onInput($event)"
           (blur)="onBlur($event)">
    <mat-icon matSuffix *ngIf="suffixIcon">{{ suffixIcon }}</mat-icon>
    <mat-error *ngIf="errorMessage">{{ errorMessage }}</mat-error>
  </mat-form-field>
</div>
"#;

pub const SCSS: &str = r#".{css_class}-wrapper {
  width: 100%;

  .{css_class}-field {
    width: 100%;

    ::ng-deep .mat-form-field-outline-thick {
      color: #007bff;
    }

    ::ng-deep .mat-form-field-required-marker {
      color: #dc3545;
    }

    input::placeholder {
      color: #999;
    }
  }
}
"#;

pub const TS: &str = r#"import { Component, Input, Output, EventEmitter } from '@angular/core';

@Component({
  selector: '{selector}',
  templateUrl: './{css_class}.component.html',
  styleUrls: ['./{css_class}.component.scss']
})
export class {class_name} {
  @Input() label: string = '{display_name}';
  @Input() placeholder: string = '';
  @Input() type: string = 'text';
  @Input() required: boolean = false;
  @Input() disabled: boolean = false;
  @Input() appearance: 'outline' | 'fill' = 'outline';
  @Input() floatLabel: 'auto' | 'always' = 'auto';
  @Input() suffixIcon: string = '';
  @Input() value: string = '';
  @Input() errorMessage: string = '';

  @Output() valueChange = new EventEmitter<string>();
  @Output() blurred = new EventEmitter<Event>();

  onInput(event: Event): void {
    this.value = (event.target as HTMLInputElement).value;
    this.valueChange.emit(this.value);
  }

  onBlur(event: Event): void {
    this.blurred.emit(event);
  }
}
"#;
