pub const HTML: &str = r#"<form class="{css_class}-form"
      [formGroup]="formGroup"
      (ngSubmit)="onSubmit()">
  <div class="form-header">
    <h3 class="form-title">{{ title || '{display_name}' }}</h3>
    <p class="form-description" *ngIf="description">{{ description }}</p>
  </div>

  <div class="form-content">
    <ng-content></ng-content>
  </div>

  <div class="form-actions">
    <button type="submit" mat-raised-button color="primary"
            [disabled]="!formGroup.valid || loading">
      <mat-spinner *ngIf="loading" diameter="20"></mat-spinner>
      {{ submitText }}
    </button>
    <button type="button" mat-button (click)="onCancel()">{{ cancelText }}</button>
  </div>
</form>
"#;

pub const SCSS: &str = r#".{css_class}-form {
  width: 100%;
  max-width: 600px;
  margin: 0 auto;

  .form-header {
    margin-bottom: 2rem;
    text-align: center;

    .form-title {
      margin: 0 0 0.5rem 0;
      font-size: 1.5rem;
      font-weight: 600;
      color: #333;
    }

    .form-description {
      margin: 0;
      color: #666;
      font-size: 0.875rem;
    }
  }

  .form-content {
    margin-bottom: 2rem;
  }

  .form-actions {
    display: flex;
    gap: 1rem;
    justify-content: center;

    button {
      min-width: 120px;
    }
  }
}
"#;

pub const TS: &str = r#"import { Component, Input, Output, EventEmitter } from '@angular/core';
import { FormGroup } from '@angular/forms';

@Component({
  selector: '{selector}',
  templateUrl: './{css_class}.component.html',
  styleUrls: ['./{css_class}.component.scss']
})
export class {class_name} {
  @Input() title: string = '{display_name}';
  @Input() description: string = '';
  @Input() submitText: string = 'Submit';
  @Input() cancelText: string = 'Cancel';
  @Input() loading: boolean = false;
  @Input() formGroup: FormGroup = new FormGroup({});

  @Output() submitted = new EventEmitter<void>();
  @Output() cancelled = new EventEmitter<void>();

  onSubmit(): void {
    if (this.formGroup.valid && !this.loading) {
      this.submitted.emit();
    }
  }

  onCancel(): void {
    this.cancelled.emit();
  }
}
"#;
