pub const HTML: &str = r#"<button class="{css_class}"
        [class.primary]="variant === 'primary'"
        [class.secondary]="variant === 'secondary'"
        [class.outline]="variant === 'outline'"
        [disabled]="disabled"
        (click)="onClick($event)">
  <mat-icon *ngIf="icon" class="button-icon">{{ icon }}</mat-icon>
  <span class="button-text">{{ text || '{display_name}' }}</span>
</button>
"#;

pub const SCSS: &str = r#".{css_class} {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  gap: 0.5rem;
  padding: 0.75rem 1.5rem;
  border: none;
  border-radius: 6px;
  font-size: 0.875rem;
  font-weight: 500;
  cursor: pointer;
  transition: all 0.2s ease;

  &:hover {
    transform: translateY(-1px);
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
  }

  &.primary {
    background: #007bff;
    color: white;

    &:hover {
      background: #0056b3;
    }

    &:disabled {
      background: #6c757d;
      cursor: not-allowed;
      transform: none;
      box-shadow: none;
    }
  }

  &.secondary {
    background: #6c757d;
    color: white;
  }

  &.outline {
    background: transparent;
    color: #007bff;
    border: 2px solid #007bff;
  }

  .button-icon {
    font-size: 1rem;
    width: 1rem;
    height: 1rem;
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
  @Input() variant: 'primary' | 'secondary' | 'outline' = 'primary';
  @Input() text: string = '{display_name}';
  @Input() icon: string = '';
  @Input() disabled: boolean = false;

  @Output() clicked = new EventEmitter<MouseEvent>();

  onClick(event: MouseEvent): void {
    if (!this.disabled) {
      this.clicked.emit(event);
    }
  }
}
"#;
